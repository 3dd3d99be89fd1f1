//! zone-display binary
//!
//! Wires the reconciliation core to its real collaborators: the player
//! core's event feed, the backlight service, the artwork image service,
//! and the remote log collector, then hands control to the event loop.

mod artwork;
mod config;
mod driver;
mod logging;
mod scheduler;
mod source;
mod surface;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;

use backlight_client::{BacklightClient, FireAndForget};
use display_core::DisplayController;
use telemetry_sink::{TelemetryLayer, TelemetrySink};

use crate::artwork::HttpArtworkSource;
use crate::config::DisplayConfig;
use crate::logging::LoggingMode;
use crate::scheduler::TokioScheduler;
use crate::surface::ConsoleSurface;

#[derive(Parser, Debug)]
#[command(
    name = "zone-display",
    about = "Now-playing display driver with playback-based backlight power management"
)]
struct Args {
    /// Path to the config file; defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local log output mode
    #[arg(long, value_enum, default_value = "development")]
    log_mode: LoggingMode,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => DisplayConfig::default_path()?,
    };
    let config =
        DisplayConfig::load(&config_path).context("configuration is required to start")?;

    let telemetry = config.logging.as_ref().map(|collector| {
        TelemetryLayer::new(TelemetrySink::spawn(
            &collector.host,
            collector.port,
            "zone-display",
        ))
    });
    logging::init_logging(args.log_mode, telemetry)?;

    tracing::info!(
        target_zone = %config.target_zone,
        core = %format!("{}:{}", config.core.host, config.core.port),
        "starting zone-display",
    );

    let (tx, rx) = mpsc::unbounded_channel();

    let backlight =
        BacklightClient::new(&config.backlight_service).context("invalid backlight endpoint")?;

    let controller = DisplayController::new(
        config.target_zone.clone(),
        config.power_timeouts(),
        ConsoleSurface::new(config.graphics.enable_dithering),
        FireAndForget::new(backlight),
        HttpArtworkSource::new(config.artwork_endpoint(), tx.clone()),
        TokioScheduler::new(tx.clone()),
    );

    source::spawn_source(config.core.host.clone(), config.core.port, tx);

    driver::run_event_loop(controller, rx).await;
    Ok(())
}
