use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clipocr_config::{Config, config_path};
use clipocr_io::{ClipboardSink, SystemClipboard};
use tracing_subscriber::EnvFilter;

mod cli;
mod context;
mod controller;
mod events;
mod state;

#[cfg(test)]
mod tests;

use cli::{Cli, Command};
use controller::AppController;
use state::{AppState, DisabledClipboard, PrimaryScreen, tesseract_factory};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        None | Some(Command::Gui) => run_gui(),
        Some(command) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(cli::run(command))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .init();
}

/// Window on the main thread, backend on a tokio runtime beside it
fn run_gui() -> anyhow::Result<()> {
    let config = Config::new();
    let config_path = match config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("Settings will not be saved: {}", e);
            None
        }
    };
    tracing::info!(tesseract = %config.tesseract_path, "Starting clipocr");

    let clipboard: Arc<dyn ClipboardSink> = match SystemClipboard::spawn() {
        Ok(clipboard) => Arc::new(clipboard),
        Err(e) => {
            tracing::error!("Clipboard unavailable: {}", e);
            Arc::new(DisabledClipboard(e.to_string()))
        }
    };

    let state = Arc::new(AppState::new(
        config.clone(),
        config_path,
        clipboard,
        Arc::new(PrimaryScreen),
        tesseract_factory(),
    ));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("clipocr-worker")
        .build()
        .context("Failed to start async runtime")?;

    let controller = AppController::new(state);
    let mut tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks()
    };

    let ui_result = clipocr_ui::run(&config, controller.app_to_ui_rx(), controller.ui_to_app_tx());

    controller.shutdown();
    runtime.block_on(async {
        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                    Err(e) => tracing::error!("Task panicked: {}", e),
                }
            }
        })
        .await;
        if drained.is_err() {
            tracing::warn!("Tasks still running after {:?}, aborting", SHUTDOWN_GRACE);
            tasks.abort_all();
        }
    });
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    ui_result
}
