//! SkyTrack - weather radar and pilot track overlays for a map view
//!
//! This library discovers the latest weather radar frame, builds slippy-map
//! tile URLs for it, fetches and normalizes pilot track-share feeds, and keeps
//! the results in a coordinator the presentation layer reads from.
//!
//! # Modules
//!
//! - [`radar`] - radar frame discovery and tile URL synthesis
//! - [`track`] - track-share feed fetching, parsing and history queries
//! - [`overlay`] - current display state and the refresh operations
//! - [`http`] - HTTP client seam shared by the fetchers
//! - [`config`] - optional INI configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod overlay;
pub mod radar;
pub mod track;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
