//! Main application logic and lifecycle management.
//!
//! This module contains the `Application` struct that wires the polling
//! engine to its collaborators (the simulated actor provider and the
//! websocket publisher) and manages startup, running, and graceful shutdown.

use crate::config::AppConfig;
use crate::logging::display_banner;
use crate::sim::SimulatedProvider;
use crate::ws::WsPublisher;
use crate::{cli::CliArgs, signals};
use mappy_core::PollScheduler;
use std::sync::Arc;
use tracing::info;

/// The assembled daemon.
///
/// Owns the loaded configuration and the scheduler driving the polling
/// pipeline. Construction wires everything together; [`run`](Application::run)
/// starts the scanner and blocks until a termination signal arrives.
pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
    /// Scheduler driving the read-and-decide cycle
    scheduler: Arc<PollScheduler>,
}

impl Application {
    /// Creates a new application instance.
    ///
    /// Loads configuration, applies CLI overrides, validates settings, and
    /// wires the scheduler to the websocket publisher and the actor
    /// provider.
    ///
    /// # Arguments
    ///
    /// * `args` - Parsed command-line arguments
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Loading configuration from: {}", args.config_path.display());
        let mut config = AppConfig::load_from_file(&args.config_path).await?;

        // Apply CLI overrides
        if let Some(url) = args.socket_url {
            config.socket.url = url;
        }
        if let Some(log_level) = args.log_level {
            config.logging.level = log_level;
        }
        if args.json_logs {
            config.logging.json_format = true;
        }

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }

        display_banner();

        // The memory-reading subsystem is pluggable behind ActorProvider;
        // until a real reader is wired in, the simulator stands in.
        let publisher = Arc::new(WsPublisher::spawn(config.socket.url.clone()));
        let provider = Arc::new(SimulatedProvider::new(config.simulation.clone()));
        let scheduler = Arc::new(PollScheduler::new(
            config.to_scanner_config(),
            provider,
            publisher,
        ));

        Ok(Self { config, scheduler })
    }

    /// Runs the daemon until a termination signal arrives, then shuts the
    /// scanner down cleanly.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        self.log_configuration_summary();

        self.scheduler.start().await?;

        info!("mappy is running - press Ctrl+C to stop");
        signals::wait_for_shutdown().await?;

        info!("Shutdown signal received, stopping the scanner...");
        self.scheduler.stop().await;
        info!("Shutdown complete");

        Ok(())
    }

    /// Logs the configuration summary at startup.
    fn log_configuration_summary(&self) {
        info!("Configuration summary:");
        info!("  Consumer socket: {}", self.config.socket.url);
        info!(
            "  Poll interval: {}ms (startup delay {}ms)",
            self.config.scanner.poll_interval_ms, self.config.scanner.startup_delay_ms
        );
        info!(
            "  Zone settle window: {}s",
            self.config.scanner.zone_settle_seconds
        );
        info!(
            "  Simulated player: {} across zones {:?}",
            self.config.simulation.player_name, self.config.simulation.zone_ids
        );
    }
}
