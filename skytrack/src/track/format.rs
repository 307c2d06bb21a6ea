//! Feed format detection and dispatch.

use std::fmt;

use super::record::RawTrackRecord;
use super::xml::root_element;
use super::{gpx, json, kml};

/// Wire formats a track-share feed may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// KML document (share-feed native format).
    Kml,
    /// GPS Exchange Format.
    Gpx,
    /// JSON array of point objects, or an object with a `points` array.
    Json,
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFormat::Kml => write!(f, "KML"),
            FeedFormat::Gpx => write!(f, "GPX"),
            FeedFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FeedFormat {
    /// Detects the format of a response body.
    ///
    /// Returns `None` when the body does not look like any supported track
    /// structure.
    pub fn detect(body: &str) -> Option<Self> {
        let trimmed = strip_preamble(body);
        match trimmed.chars().next()? {
            '[' | '{' => Some(FeedFormat::Json),
            '<' => match root_element(trimmed)?.as_str() {
                "kml" => Some(FeedFormat::Kml),
                "gpx" => Some(FeedFormat::Gpx),
                _ => None,
            },
            _ => None,
        }
    }

    /// Extracts raw records from `body`, which must be in this format.
    ///
    /// Individual malformed records are returned as-is and dropped during
    /// normalization; an `Err` means the document itself is unreadable.
    pub fn parse(self, body: &str) -> Result<Vec<RawTrackRecord>, String> {
        let body = strip_preamble(body);
        match self {
            FeedFormat::Kml => kml::parse(body),
            FeedFormat::Gpx => gpx::parse(body),
            FeedFormat::Json => json::parse(body),
        }
    }
}

fn strip_preamble(body: &str) -> &str {
    body.trim_start_matches('\u{feff}').trim_start()
}
