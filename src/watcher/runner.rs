//! Ways of executing one pipeline run for the watch loop.
//!
//! The watch loop only sees [`PipelineRunner`]. The production runner starts
//! the `generate` subcommand as a child process, so a panic or hang in
//! extraction cannot take the watcher down with it.

use std::ffi::OsString;
use std::path::PathBuf;

use futures::future::{BoxFuture, FutureExt};
use tokio::process::Command;

use super::controller::RunOutcome;
use crate::config::Config;
use crate::error::WatcherError;
use crate::pipeline::{run_pipeline, PipelineConfig};
use crate::Result;

/// Executes a single pipeline run.
pub trait PipelineRunner: Send + Sync {
    /// Start a run. The returned future resolves when the run has ended.
    fn run(&self) -> BoxFuture<'static, RunOutcome>;
}

/// Runs the pipeline as a child process.
#[derive(Debug, Clone)]
pub struct SubprocessRunner {
    program: PathBuf,
    args: Vec<OsString>,
}

impl SubprocessRunner {
    /// Run `program` with `args`; exit status zero means success.
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Re-invoke the current executable's `generate` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the current executable cannot be located.
    pub fn generate(config: &Config) -> Result<Self> {
        let program = std::env::current_exe()
            .map_err(|e| WatcherError::RunFailed(format!("cannot locate executable: {e}")))?;

        Ok(Self::generate_with(program, config))
    }

    /// Run `program generate` over the roots of `config`.
    ///
    /// Logging flags go before the subcommand so the child logs the same
    /// way as the watcher.
    pub fn generate_with(program: impl Into<PathBuf>, config: &Config) -> Self {
        let mut args = vec![
            OsString::from("--log-level"),
            OsString::from(&config.log_level),
        ];
        if config.log_json {
            args.push(OsString::from("--log-json"));
        }
        args.extend([
            OsString::from("generate"),
            OsString::from("--source"),
            config.source_root.clone().into_os_string(),
            OsString::from("--output"),
            config.output_root.clone().into_os_string(),
        ]);

        Self::new(program, args)
    }
}

impl PipelineRunner for SubprocessRunner {
    fn run(&self) -> BoxFuture<'static, RunOutcome> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        let program = self.program.display().to_string();

        async move {
            match command.status().await {
                Ok(status) if status.success() => RunOutcome::Succeeded,
                Ok(status) => {
                    tracing::warn!(%program, %status, "Pipeline process failed");
                    RunOutcome::Failed
                }
                Err(e) => {
                    tracing::error!(%program, error = %e, "Failed to spawn pipeline process");
                    RunOutcome::Failed
                }
            }
        }
        .boxed()
    }
}

/// Runs the pipeline on a blocking thread of the current runtime.
///
/// No process isolation; meant for embedding and tests.
#[derive(Debug, Clone)]
pub struct InProcessRunner {
    config: PipelineConfig,
}

impl InProcessRunner {
    /// Runner for `config`.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }
}

impl PipelineRunner for InProcessRunner {
    fn run(&self) -> BoxFuture<'static, RunOutcome> {
        let config = self.config.clone();

        async move {
            match tokio::task::spawn_blocking(move || run_pipeline(&config)).await {
                Ok(Ok(report)) => {
                    tracing::info!(generated = report.generated, "Generated reference pages");
                    RunOutcome::Succeeded
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Pipeline run failed");
                    RunOutcome::Failed
                }
                Err(e) => {
                    tracing::error!(error = %e, "Pipeline task panicked");
                    RunOutcome::Failed
                }
            }
        }
        .boxed()
    }
}
