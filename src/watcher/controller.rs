//! Watch-and-regenerate state machine.
//!
//! The controller owns the debounce deadline and the pending-rerun flag and
//! never touches a clock or a process itself: callers pass the current
//! instant in and execute the returned [`Action`]s. At most one run is ever
//! in flight; changes that arrive during a run collapse into one rerun.

use std::time::Duration;

use tokio::time::Instant;

use super::events::FileEvent;

/// Run state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run in progress. A debounce deadline may be armed.
    Idle,
    /// A run is in progress and nothing changed since it started.
    Running,
    /// A run is in progress and sources changed since it started.
    PendingRerun,
}

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed,
}

impl RunOutcome {
    /// Metric label for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "success",
            Self::Failed => "failure",
        }
    }
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a pipeline run.
    StartRun,
    /// Tell connected clients to reload.
    Reload,
}

/// Debounced, single-flight regeneration controller.
#[derive(Debug)]
pub struct WatchController {
    state: RunState,
    deadline: Option<Instant>,
    debounce: Duration,
    extension: String,
}

impl WatchController {
    /// Create an idle controller reacting to files with `extension`.
    pub fn new(debounce: Duration, extension: impl Into<String>) -> Self {
        Self {
            state: RunState::Idle,
            deadline: None,
            debounce,
            extension: extension.into(),
        }
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Armed debounce deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Begin watching. The first run starts immediately, without any change.
    pub fn start(&mut self) -> Option<Action> {
        if self.state != RunState::Idle {
            return None;
        }
        self.deadline = None;
        self.state = RunState::Running;
        Some(Action::StartRun)
    }

    /// Record a file change. Returns whether the event was relevant.
    pub fn on_change(&mut self, event: &FileEvent, now: Instant) -> bool {
        if !event.touches_extension(&self.extension) {
            return false;
        }

        match self.state {
            RunState::Idle => self.deadline = Some(now + self.debounce),
            RunState::Running | RunState::PendingRerun => self.state = RunState::PendingRerun,
        }
        true
    }

    /// Fire the debounce deadline if it has passed.
    ///
    /// A deadline only exists while idle: it is armed by changes in `Idle`
    /// and cleared whenever a run starts.
    pub fn on_deadline(&mut self, now: Instant) -> Option<Action> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                debug_assert_eq!(self.state, RunState::Idle);
                self.deadline = None;
                self.state = RunState::Running;
                Some(Action::StartRun)
            }
            _ => None,
        }
    }

    /// Record the end of the in-flight run.
    ///
    /// A pending rerun starts right away whatever the outcome, since the
    /// changes it covers may be what fixes a failed run. Otherwise a
    /// success reloads clients and a failure just goes idle.
    pub fn on_run_finished(&mut self, outcome: RunOutcome) -> Option<Action> {
        match (self.state, outcome) {
            (RunState::PendingRerun, _) => {
                self.state = RunState::Running;
                Some(Action::StartRun)
            }
            (RunState::Running, RunOutcome::Succeeded) => {
                self.state = RunState::Idle;
                Some(Action::Reload)
            }
            (RunState::Running, RunOutcome::Failed) => {
                self.state = RunState::Idle;
                None
            }
            (RunState::Idle, _) => {
                tracing::warn!("Run finished while controller was idle");
                None
            }
        }
    }
}
