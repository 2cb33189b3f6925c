//! Course App service.
//!
//! A small CRUD API over course records built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request    ┌─────────┐    ┌────────────────┐    ┌──────────────────┐
//!     ─────────────────▶│  http   │───▶│ CourseController│───▶│ CourseRepository │
//!                       │ server  │    │                │    │ (memory + file)  │
//!     Client Response   │         │◀───│ log/span/metric│◀───│                  │
//!     ◀─────────────────└─────────┘    └────────────────┘    └──────────────────┘
//!
//!                       Cross-cutting: config, observability, lifecycle
//! ```

use clap::Parser;
use std::path::PathBuf;

use course_app::config::{load_config, validate_config, AppConfig, ConfigError};
use course_app::lifecycle::{signals, startup, Shutdown};
use course_app::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "course-app")]
#[command(about = "Course management web service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    init_logging(&config.observability)?;

    tracing::info!("course-app v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        data_file = ?config.storage.data_file,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    startup::run(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
