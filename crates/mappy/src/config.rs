//! Configuration management for the mappy daemon.
//!
//! This module handles loading, validation, and conversion of daemon
//! configuration from TOML files and command-line arguments.

use mappy_core::ScannerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

fn default_socket_url() -> String {
    "ws://127.0.0.1:8080/socket".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_player_name() -> String {
    "Adventurer".to_string()
}

fn default_zone_ids() -> Vec<u32> {
    vec![100, 105, 148]
}

fn default_zone_dwell_secs() -> u64 {
    30
}

fn default_load_screen_ms() -> u64 {
    800
}

fn default_walk_speed() -> f64 {
    6.0
}

/// Application configuration loaded from a TOML file.
///
/// Encompasses the outbound socket, scanner timing, logging, and the
/// built-in simulated provider used until a real memory reader is wired in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Outbound socket settings
    #[serde(default)]
    pub socket: SocketSettings,
    /// Scanner timing settings
    #[serde(default)]
    pub scanner: ScannerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Simulated actor provider settings
    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Outbound socket configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketSettings {
    /// Websocket URL of the map consumer (e.g., "ws://127.0.0.1:8080/socket")
    #[serde(default = "default_socket_url")]
    pub url: String,
}

/// Logging system configuration.
///
/// Controls log output format and level filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

/// Simulated actor provider configuration.
///
/// The simulator walks a character around the map and rotates through the
/// configured zone list, emulating the zone-0 load screen between zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Character name reported by the simulator
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Zone ids the simulated player cycles through
    #[serde(default = "default_zone_ids")]
    pub zone_ids: Vec<u32>,
    /// Seconds spent in each zone before moving on
    #[serde(default = "default_zone_dwell_secs")]
    pub zone_dwell_secs: u64,
    /// Length of the emulated load screen (zone id 0) between zones
    #[serde(default = "default_load_screen_ms")]
    pub load_screen_ms: u64,
    /// Walk speed in world units per second
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f64,
}

impl Default for SocketSettings {
    fn default() -> Self {
        Self {
            url: default_socket_url(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            zone_ids: default_zone_ids(),
            zone_dwell_secs: default_zone_dwell_secs(),
            load_screen_ms: default_load_screen_ms(),
            walk_speed: default_walk_speed(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            socket: SocketSettings::default(),
            scanner: ScannerConfig::default(),
            logging: LoggingSettings::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file, creating a default file if it
    /// doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The loaded or default configuration, or an error if loading/creation failed.
    pub async fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Extracts the scanner timing configuration for the polling engine.
    pub fn to_scanner_config(&self) -> ScannerConfig {
        self.scanner.clone()
    }

    /// Validates the configuration for consistency and correctness.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error string describing the issue.
    pub fn validate(&self) -> Result<(), String> {
        if !self.socket.url.starts_with("ws://") && !self.socket.url.starts_with("wss://") {
            return Err(format!(
                "Invalid socket url (must be ws:// or wss://): {}",
                &self.socket.url
            ));
        }

        self.scanner.validate()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        if self.simulation.zone_ids.is_empty() {
            return Err("simulation.zone_ids cannot be empty".to_string());
        }
        if self.simulation.zone_ids.contains(&0) {
            return Err("simulation.zone_ids cannot contain 0 (reserved for load screens)".to_string());
        }
        if self.simulation.player_name.is_empty() {
            return Err("simulation.player_name cannot be empty".to_string());
        }

        Ok(())
    }
}
