//! Point and density map viewer service.
//!
//! Loads a point payload once at startup and serves:
//! - The drawing state for the marker and density layers
//! - Controls for radius, blur and layer visibility
//! - Fit-to-data and status/KPI readouts

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pointmap_core::{source_for, RecordingSurface, Viewer};
use pointmap_viewer::config::ViewerConfig;
use pointmap_viewer::{dispatch, server};

#[derive(Parser, Debug)]
#[command(name = "pointmap-viewer")]
#[command(about = "Point and density map viewer with an HTTP control API")]
struct Args {
    /// Configuration file
    #[arg(long, env = "POINTMAP_CONFIG", default_value = "config/viewer.yaml")]
    config: PathBuf,

    /// Point data location, URL or file path (overrides the config file)
    #[arg(long, env = "POINTMAP_SOURCE")]
    source: Option<String>,

    /// Object key to read weights from (overrides the config file)
    #[arg(long)]
    weight_field: Option<String>,

    /// Port for the HTTP API (overrides the config file)
    #[arg(long, env = "POINTMAP_PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting pointmap viewer");

    let mut config = ViewerConfig::load(&args.config)?;
    if let Some(source) = args.source {
        config.data.source = source;
    }
    if let Some(field) = args.weight_field {
        config.data.weight_field = field;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let settings = config.viewer_settings()?;
    let source = source_for(&config.data.source)
        .with_context(|| format!("Invalid data source: {}", config.data.source))?;

    info!(
        source = %config.data.source,
        weight_field = %config.data.weight_field,
        port = config.server.port,
        "Viewer configured"
    );

    let viewer = Viewer::new(RecordingSurface::new(), settings);
    let (handle, dispatcher) = dispatch::spawn(viewer, source);

    // Shutdown signal
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        shutdown_tx.send(()).ok();
    });

    server::run_server(handle, config.server.port, shutdown_rx)
        .await
        .context("Viewer API server failed")?;

    // A fetch that never returned would keep the dispatcher alive.
    dispatcher.abort();
    info!("Viewer stopped");

    Ok(())
}
