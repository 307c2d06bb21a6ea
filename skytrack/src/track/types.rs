//! Normalized track point types.

use chrono::{DateTime, Utc};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a position, returning `None` if either component is out of
    /// range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// One fix from a pilot's track-share feed.
///
/// Points are identified by `timestamp` within a single fetch; there is no
/// identity across fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct PilotTrackPoint {
    pub pilot_name: String,
    pub timestamp: DateTime<Utc>,
    pub coordinates: Coordinates,
    /// Ground speed as reported by the feed (km/h for share feeds).
    pub speed: f64,
    /// Altitude in meters.
    pub altitude: f64,
    pub in_emergency: bool,
}
