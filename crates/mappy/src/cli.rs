//! Command-line interface handling for the mappy daemon.
//!
//! This module provides command-line argument parsing using the `clap`
//! crate, with options that override settings from the configuration file.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
///
/// Holds all the command-line options that can be used to override
/// configuration file settings or provide runtime parameters.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for the consumer websocket URL
    pub socket_url: Option<String>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
}

impl CliArgs {
    /// Parses command line arguments using clap.
    ///
    /// # Returns
    ///
    /// A `CliArgs` instance containing all parsed command-line options.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Builds the clap command definition.
    fn command() -> Command {
        Command::new("mappy")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Game state telemetry daemon: polls the game client and streams map events")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("mappy.toml"),
            )
            .arg(
                Arg::new("url")
                    .short('u')
                    .long("url")
                    .value_name("URL")
                    .help("Consumer websocket URL (e.g., ws://127.0.0.1:8080/socket)"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    /// Extracts the parsed options from clap's matches.
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: PathBuf::from(
                matches
                    .get_one::<String>("config")
                    .expect("Default config path should always be set"),
            ),
            socket_url: matches.get_one::<String>("url").cloned(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> CliArgs {
        let matches = CliArgs::command()
            .try_get_matches_from(argv)
            .expect("argv should parse");
        CliArgs::from_matches(&matches)
    }

    #[test]
    fn test_defaults_when_no_arguments_given() {
        let args = parse(&["mappy"]);

        assert_eq!(args.config_path, PathBuf::from("mappy.toml"));
        assert_eq!(args.socket_url, None);
        assert_eq!(args.log_level, None);
        assert!(!args.json_logs);
    }

    #[test]
    fn test_overrides_are_parsed_from_argv() {
        let args = parse(&[
            "mappy",
            "--config",
            "production.toml",
            "--url",
            "ws://maps.example:8080/socket",
            "--log-level",
            "debug",
            "--json-logs",
        ]);

        assert_eq!(args.config_path, PathBuf::from("production.toml"));
        assert_eq!(
            args.socket_url,
            Some("ws://maps.example:8080/socket".to_string())
        );
        assert_eq!(args.log_level, Some("debug".to_string()));
        assert!(args.json_logs);
    }

    #[test]
    fn test_short_flags_match_long_flags() {
        let args = parse(&["mappy", "-c", "alt.toml", "-u", "ws://127.0.0.1:9000/socket", "-l", "trace"]);

        assert_eq!(args.config_path, PathBuf::from("alt.toml"));
        assert_eq!(
            args.socket_url,
            Some("ws://127.0.0.1:9000/socket".to_string())
        );
        assert_eq!(args.log_level, Some("trace".to_string()));
    }

    #[test]
    fn test_unknown_argument_is_rejected() {
        assert!(CliArgs::command()
            .try_get_matches_from(["mappy", "--bogus"])
            .is_err());
    }
}
