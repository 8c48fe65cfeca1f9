//! # mappy - Game State Telemetry Daemon
//!
//! Polls a game client's in-memory state and streams player identity, zone
//! changes, and position updates to a live map consumer over a websocket.
//! This entry point handles CLI parsing, configuration loading, and
//! application lifecycle management.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with default configuration
//! mappy
//!
//! # Specify custom configuration
//! mappy --config production.toml
//!
//! # Override specific settings
//! mappy --url ws://maps.example:8080/socket --log-level debug
//!
//! # JSON logging for production
//! mappy --json-logs
//! ```
//!
//! ## Configuration
//!
//! The daemon loads configuration from a TOML file (default: `mappy.toml`).
//! If the file doesn't exist, a default configuration will be created.
//!
//! ## Signal Handling
//!
//! The daemon shuts down gracefully on SIGINT (Ctrl+C) and SIGTERM.

use tracing::error;

mod app;
mod cli;
mod config;
mod logging;
mod signals;
mod sim;
mod ws;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

/// Main entry point for the mappy daemon.
///
/// Handles the complete application lifecycle:
/// 1. Command-line argument parsing
/// 2. Configuration loading
/// 3. Logging system initialization
/// 4. Application creation and execution
///
/// # Exit Codes
///
/// * **0**: Successful execution and shutdown
/// * **1**: Error during startup, configuration, or runtime
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Load configuration early to get logging settings; CLI overrides win.
    let mut config = AppConfig::load_from_file(&args.config_path)
        .await
        .unwrap_or_default();
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&config.logging, args.json_logs) {
        eprintln!("Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("Application error: {e:?}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to start application: {e:?}");
            std::process::exit(1);
        }
    }

    Ok(())
}

// Re-export configuration types for potential library usage
pub use config::{LoggingSettings, SimulationSettings, SocketSettings};
