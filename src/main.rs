//! refsync - Java API reference generator
//!
//! Entry point for the `generate` and `watch` commands.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use refsync::pipeline::{run_pipeline, PipelineConfig};
use refsync::server::{init_metrics, init_tracing, shutdown_signal, App, ReloadBroadcaster, ServerConfig};
use refsync::watcher::{FileWatcher, SubprocessRunner, WatchController, WatchService};
use refsync::{Config, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// refsync - Markdown API reference pages from Java sources
#[derive(Parser, Debug)]
#[command(name = "refsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "REFSYNC_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, global = true, env = "REFSYNC_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Source and output roots shared by both commands.
#[derive(clap::Args, Debug)]
struct Paths {
    /// Root of the Java source tree
    #[arg(short, long, env = "REFSYNC_SOURCE", default_value = "../src/main/java")]
    source: PathBuf,

    /// Root of the generated reference pages
    #[arg(short, long, env = "REFSYNC_OUTPUT", default_value = "src/content/reference")]
    output: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate reference pages once
    Generate {
        #[command(flatten)]
        paths: Paths,
    },

    /// Regenerate on source changes and push reloads to connected pages
    Watch {
        #[command(flatten)]
        paths: Paths,

        /// Host address for the reload server
        #[arg(long, env = "REFSYNC_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port for the reload server
        #[arg(short, long, env = "REFSYNC_PORT", default_value = "4322")]
        port: u16,

        /// Quiet period before a change burst triggers a run
        #[arg(long, env = "REFSYNC_DEBOUNCE_MS", default_value = "150")]
        debounce_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json);

    match cli.command {
        Command::Generate { paths } => {
            let config = Config {
                source_root: paths.source,
                output_root: paths.output,
                log_level: cli.log_level,
                log_json: cli.log_json,
                ..Config::default()
            };
            config.validate()?;
            generate(&config)
        }
        Command::Watch {
            paths,
            host,
            port,
            debounce_ms,
        } => {
            let config = Config {
                source_root: paths.source,
                output_root: paths.output,
                debounce: Duration::from_millis(debounce_ms),
                host,
                port,
                log_level: cli.log_level,
                log_json: cli.log_json,
                ..Config::default()
            };
            config.validate()?;
            watch(config).await
        }
    }
}

fn generate(config: &Config) -> Result<()> {
    tracing::debug!(?config, "Configuration loaded");

    let report = run_pipeline(&PipelineConfig::from(config))?;
    println!("Generated {} reference pages.", report.generated);
    Ok(())
}

async fn watch(config: Config) -> Result<()> {
    tracing::info!(
        "refsync v{} watching {:?}, reload server on {}",
        env!("CARGO_PKG_VERSION"),
        config.source_root,
        config.server_addr()
    );

    init_metrics();

    let (event_tx, event_rx) = mpsc::channel(256);
    let mut file_watcher = FileWatcher::new(event_tx)?;
    if let Err(e) = file_watcher.watch(&config.source_root) {
        tracing::warn!(error = %e, "Source root not watched; only the initial run will happen");
    }

    let shutdown = CancellationToken::new();
    let reload = ReloadBroadcaster::new();

    let service = WatchService::new(
        WatchController::new(config.debounce, config.extension.clone()),
        SubprocessRunner::generate(&config)?,
        reload.clone(),
        event_rx,
        shutdown.clone(),
    );

    let app = App::new(ServerConfig::from(&config), reload);
    let server_token = shutdown.clone();
    let server = tokio::spawn(async move {
        // A server that fails to start takes the watch loop down with it.
        let result = app.run(server_token.clone()).await;
        server_token.cancel();
        result
    });

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    service.run().await;
    shutdown.cancel();
    drop(file_watcher);

    match server.await {
        Ok(result) => result,
        Err(e) => Err(refsync::Error::internal(format!("server task failed: {e}"))),
    }
}
