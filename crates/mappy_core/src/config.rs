//! Scanner configuration types and defaults.
//!
//! This module contains the timing configuration for the polling engine.
//! Values are supplied once at construction and never mutated; changing them
//! requires rebuilding the scheduler.

use serde::{Deserialize, Serialize};

/// Default startup delay for serde deserialization
fn default_startup_delay_ms() -> u64 {
    1000
}

/// Default poll interval for serde deserialization
fn default_poll_interval_ms() -> u64 {
    50
}

/// Default settle window for serde deserialization
fn default_zone_settle_seconds() -> u32 {
    3
}

/// Timing configuration for the polling engine.
///
/// Controls the one-time startup delay, the position poll cadence, and the
/// length of the suppression window that follows a zone transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// One-shot delay before the first memory read, in milliseconds.
    /// Gives the memory-reading subsystem time to finish attaching.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,

    /// Interval between position polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Length of the post-transition settle window, in seconds.
    /// Counted down on a fixed 1-second cadence regardless of the poll interval.
    #[serde(default = "default_zone_settle_seconds")]
    pub zone_settle_seconds: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: default_startup_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            zone_settle_seconds: default_zone_settle_seconds(),
        }
    }
}

impl ScannerConfig {
    /// Validates the configuration for consistency and correctness.
    ///
    /// All three timing values must be positive; a zero poll interval or
    /// settle window would degenerate into a busy loop or no debounce at all.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error string describing the issue.
    pub fn validate(&self) -> Result<(), String> {
        if self.startup_delay_ms == 0 {
            return Err("startup_delay_ms must be greater than 0".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }
        if self.zone_settle_seconds == 0 {
            return Err("zone_settle_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_config_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.startup_delay_ms, 1000);
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.zone_settle_seconds, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scanner_config_rejects_zero_values() {
        let mut config = ScannerConfig::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        config.poll_interval_ms = 50;
        config.startup_delay_ms = 0;
        assert!(config.validate().is_err());

        config.startup_delay_ms = 1000;
        config.zone_settle_seconds = 0;
        assert!(config.validate().is_err());
    }
}
