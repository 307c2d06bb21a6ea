//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::track::validate_feed_url;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [radar] section
    if let Some(section) = ini.section(Some("radar")) {
        if let Some(v) = non_empty(section.get("metadata_url")) {
            if validate_feed_url(v).is_err() {
                return Err(invalid("radar", "metadata_url", v, "must be an http(s) URL"));
            }
            config.radar.metadata_url = v.to_string();
        }
    }

    // [track] section
    if let Some(section) = ini.section(Some("track")) {
        if let Some(v) = non_empty(section.get("feed_url")) {
            if validate_feed_url(v).is_err() {
                return Err(invalid("track", "feed_url", v, "must be an http(s) URL"));
            }
            config.track.feed_url = Some(v.to_string());
        }
        if let Some(v) = non_empty(section.get("max_points")) {
            config.track.max_points = v
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("track", "max_points", v, "must be a positive integer"))?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = non_empty(section.get("timeout")) {
            let secs: u64 = v.parse().ok().filter(|n| *n > 0).ok_or_else(|| {
                invalid("download", "timeout", v, "must be a positive integer (seconds)")
            })?;
            config.download.timeout = Some(secs);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::DEFAULT_MAX_TRACK_POINTS;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_all_sections() {
        let config = parse(
            "[radar]\nmetadata_url = https://meta.example/maps.json\n\
             [track]\nfeed_url = https://share.example.com/Feed/Share/ada\nmax_points = 500\n\
             [download]\ntimeout = 20\n\
             [logging]\nfile = /tmp/skytrack/test.log\n",
        )
        .unwrap();

        assert_eq!(config.radar.metadata_url, "https://meta.example/maps.json");
        assert_eq!(
            config.track.feed_url.as_deref(),
            Some("https://share.example.com/Feed/Share/ada")
        );
        assert_eq!(config.track.max_points, 500);
        assert_eq!(
            config.download.timeout_duration(),
            Some(std::time::Duration::from_secs(20))
        );
        assert_eq!(config.logging.file, PathBuf::from("/tmp/skytrack/test.log"));
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = parse("[track]\nfeed_url =\nmax_points =\n[download]\ntimeout =\n").unwrap();
        assert!(config.track.feed_url.is_none());
        assert_eq!(config.track.max_points, DEFAULT_MAX_TRACK_POINTS);
        assert!(config.download.timeout.is_none());
    }

    #[test]
    fn test_invalid_feed_url() {
        let err = parse("[track]\nfeed_url = share.example.com\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, .. } => {
                assert_eq!(section, "track");
                assert_eq!(key, "feed_url");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(parse("[track]\nmax_points = 0\n").is_err());
        assert!(parse("[track]\nmax_points = lots\n").is_err());
        assert!(parse("[download]\ntimeout = -5\n").is_err());
        assert!(parse("[download]\ntimeout = 0\n").is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/var/log/x.log"), PathBuf::from("/var/log/x.log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.log"), home.join("x.log"));
        }
    }
}
