//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use skytrack::config::{config_file_path, ConfigFileError};
use skytrack::error::FeedError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// No feed URL on the command line or in config.ini
    MissingFeedUrl,
    /// `--since-hours` reaches before the earliest representable time
    SinceOutOfRange(u32),
    /// Radar or track feed operation failed
    Feed(FeedError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Check {}", config_file_path().display());
            }
            CliError::MissingFeedUrl => {
                eprintln!();
                eprintln!("Pass a feed URL or add one to the config file:");
                eprintln!("  [track]");
                eprintln!("  feed_url = https://share.garmin.com/Feed/Share/<name>");
            }
            CliError::Feed(FeedError::NotAvailable) => {
                eprintln!();
                eprintln!("The radar service published no frames. Try again in a few minutes.");
            }
            CliError::Feed(FeedError::DecodeFailed { .. }) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. The share page is private or disabled");
                eprintln!("  2. The URL points at a web page instead of the feed");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::MissingFeedUrl => write!(f, "No track feed URL given"),
            CliError::SinceOutOfRange(hours) => {
                write!(f, "--since-hours {} is too far in the past", hours)
            }
            CliError::Feed(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Feed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<FeedError> for CliError {
    fn from(e: FeedError) -> Self {
        CliError::Feed(e)
    }
}
