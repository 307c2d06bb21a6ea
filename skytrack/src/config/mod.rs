//! User configuration loaded from `~/.skytrack/config.ini`.
//!
//! Every key is optional; a missing file or section yields the defaults.
//!
//! ```ini
//! [radar]
//! metadata_url = https://api.rainviewer.com/public/weather-maps.json
//!
//! [track]
//! feed_url = https://share.garmin.com/Feed/Share/ada
//! max_points = 10000
//!
//! [download]
//! timeout = 30
//!
//! [logging]
//! file = ~/.skytrack/skytrack.log
//! ```

mod file;
mod parser;
mod settings;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, DownloadSettings, LoggingSettings, RadarSettings, TrackSettings};
