// Mindful Me entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the prediction client
// 4. Create mpsc channels
// 5. Spawn the interaction loop task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use mindful_me::app;
use mindful_me::config;
use mindful_me::predict::client::PredictionClient;
use mindful_me::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Mindful Me starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: endpoint={}, timeout={:?}, max_chars={}",
        config.endpoint.url, config.endpoint.timeout, config.input.max_chars
    );

    // 3. Build the prediction client
    let client = PredictionClient::from_config(&config)
        .context("failed to build prediction client")?;

    // 4. Create mpsc channels
    let (prediction_tx, prediction_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let controller = app::InteractionController::new(Arc::new(client), prediction_tx, ui_tx);

    // 5. Spawn the interaction loop task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, prediction_rx, controller).await {
            error!("Interaction loop error: {}", e);
        }
    });

    // 6. Run the TUI (blocks until the user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, config.input.max_chars).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for the interaction loop to finish (with timeout)
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Mindful Me shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("mindful-me.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mindful_me=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
