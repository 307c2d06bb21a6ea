//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`radar`] - Latest radar frame and tile URL
//! - [`tile`] - Offline tile URL construction
//! - [`track`] - Pilot track feed loading

pub mod radar;
pub mod tile;
pub mod track;

use chrono::{DateTime, Utc};

/// Format a unix timestamp for display.
pub(crate) fn format_unix_time(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| seconds.to_string())
}
