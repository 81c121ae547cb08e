//! Async driver for the [`WatchController`].
//!
//! Feeds file events, debounce expiries and run completions into the
//! controller and carries out the actions it returns.

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::controller::{Action, RunOutcome, WatchController};
use super::events::FileEvent;
use super::runner::PipelineRunner;
use crate::server::metrics::{
    CHANGE_EVENTS_TOTAL, PIPELINE_RUNS_TOTAL, PIPELINE_RUN_SECONDS, RELOADS_TOTAL,
};
use crate::server::{run_span, ReloadBroadcaster};

/// Watch loop tying file events, the controller, a runner and reload clients.
pub struct WatchService<R> {
    controller: WatchController,
    runner: R,
    reload: ReloadBroadcaster,
    events: mpsc::Receiver<FileEvent>,
    shutdown: CancellationToken,
    runs_started: u64,
}

impl<R: PipelineRunner> WatchService<R> {
    /// Create a watch loop. Nothing happens until [`run`](Self::run).
    pub fn new(
        controller: WatchController,
        runner: R,
        reload: ReloadBroadcaster,
        events: mpsc::Receiver<FileEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            controller,
            runner,
            reload,
            events,
            shutdown,
            runs_started: 0,
        }
    }

    /// Run until `shutdown` is cancelled or the event source closes.
    ///
    /// An in-flight pipeline run is not interrupted on exit.
    pub async fn run(mut self) {
        let (done_tx, mut done_rx) = mpsc::channel::<RunOutcome>(1);

        if let Some(action) = self.controller.start() {
            self.apply(action, &done_tx);
        }

        loop {
            let deadline = self.controller.deadline();

            tokio::select! {
                () = self.shutdown.cancelled() => {
                    tracing::info!("Watch loop shutting down");
                    break;
                }
                event = self.events.recv() => {
                    let Some(event) = event else {
                        tracing::info!("File event source closed");
                        break;
                    };
                    if self.controller.on_change(&event, Instant::now()) {
                        CHANGE_EVENTS_TOTAL.inc();
                        tracing::debug!(path = %event.path().display(), state = ?self.controller.state(), "Source changed");
                    }
                }
                Some(outcome) = done_rx.recv() => {
                    if let Some(action) = self.controller.on_run_finished(outcome) {
                        self.apply(action, &done_tx);
                    }
                }
                () = sleep_until_deadline(deadline) => {
                    if let Some(action) = self.controller.on_deadline(Instant::now()) {
                        self.apply(action, &done_tx);
                    }
                }
            }
        }
    }

    fn apply(&mut self, action: Action, done_tx: &mpsc::Sender<RunOutcome>) {
        match action {
            Action::StartRun => {
                self.runs_started += 1;
                let span = run_span(self.runs_started);
                let run = self.runner.run();
                let done_tx = done_tx.clone();

                tokio::spawn(
                    async move {
                        tracing::info!("Regenerating reference pages");
                        let timer = PIPELINE_RUN_SECONDS.start_timer();
                        let outcome = run.await;
                        timer.observe_duration();
                        PIPELINE_RUNS_TOTAL
                            .with_label_values(&[outcome.as_str()])
                            .inc();
                        if done_tx.send(outcome).await.is_err() {
                            tracing::debug!("Watch loop gone before run finished");
                        }
                    }
                    .instrument(span),
                );
            }
            Action::Reload => {
                let clients = self.reload.send_full_reload();
                RELOADS_TOTAL.inc();
                tracing::info!(clients, "Sent full reload");
            }
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
