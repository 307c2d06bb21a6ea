//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;
use std::time::Duration;

use crate::overlay::DEFAULT_MAX_TRACK_POINTS;
use crate::radar::DEFAULT_RADAR_METADATA_URL;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "skytrack.log";

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub radar: RadarSettings,
    pub track: TrackSettings,
    pub download: DownloadSettings,
    pub logging: LoggingSettings,
}

/// Radar metadata endpoint.
#[derive(Debug, Clone)]
pub struct RadarSettings {
    pub metadata_url: String,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            metadata_url: DEFAULT_RADAR_METADATA_URL.to_string(),
        }
    }
}

/// Track-share feed settings.
#[derive(Debug, Clone)]
pub struct TrackSettings {
    /// Feed to load when none is given on the command line.
    pub feed_url: Option<String>,
    /// Upper bound on stored track points.
    pub max_points: usize,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            feed_url: None,
            max_points: DEFAULT_MAX_TRACK_POINTS,
        }
    }
}

/// HTTP settings.
#[derive(Debug, Clone, Default)]
pub struct DownloadSettings {
    /// Request timeout in seconds; `None` keeps the transport default.
    pub timeout: Option<u64>,
}

impl DownloadSettings {
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: super::file::config_directory().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}
