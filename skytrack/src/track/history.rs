//! Track history and derived statistics.
//!
//! Holds the points of one fetch in feed order and answers the questions a
//! list or map view asks about them.
//!
//! # Design
//!
//! - Points are never re-sorted; "latest" means last in feed order
//! - History is bounded by dropping the oldest points first
//! - Distances use the haversine formula, bearing a flat-earth approximation

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::types::PilotTrackPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minimum displacement (in degrees) for a meaningful overall bearing.
/// ~100m at equator = ~0.001 degrees.
const MIN_DISTANCE_FOR_BEARING_DEG: f64 = 0.001;

/// Ordered track points from one feed fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackHistory {
    points: Vec<PilotTrackPoint>,
}

/// Aggregate figures for a track history.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSummary {
    pub point_count: usize,
    pub first_time: DateTime<Utc>,
    pub last_time: DateTime<Utc>,
    /// Time between first and last point (zero if they are out of order).
    pub duration: Duration,
    /// Great-circle distance along consecutive points.
    pub distance_km: f64,
    pub max_altitude: f64,
    pub max_speed: f64,
    pub any_emergency: bool,
    /// Bearing from the first to the last point, `None` when they are too close.
    pub overall_bearing: Option<f64>,
}

impl From<Vec<PilotTrackPoint>> for TrackHistory {
    fn from(points: Vec<PilotTrackPoint>) -> Self {
        Self { points }
    }
}

impl TrackHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All points in feed order.
    pub fn points(&self) -> &[PilotTrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PilotTrackPoint> {
        self.points.iter()
    }

    /// The most recent point by feed order.
    pub fn latest(&self) -> Option<&PilotTrackPoint> {
        self.points.last()
    }

    /// Points whose timestamp lies in `[start, end]`, in feed order.
    pub fn between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&PilotTrackPoint> {
        self.points
            .iter()
            .filter(|p| p.timestamp >= start && p.timestamp <= end)
            .collect()
    }

    /// Points reported while the device was in emergency mode.
    pub fn emergencies(&self) -> Vec<&PilotTrackPoint> {
        self.points.iter().filter(|p| p.in_emergency).collect()
    }

    /// Keep only the last `max` points. Returns how many were dropped.
    pub fn retain_latest(&mut self, max: usize) -> usize {
        let excess = self.points.len().saturating_sub(max);
        self.points.drain(..excess);
        excess
    }

    /// Summarize the history, `None` when it is empty.
    pub fn summary(&self) -> Option<TrackSummary> {
        let first = self.points.first()?;
        let last = self.points.last()?;

        let distance_km = self
            .points
            .windows(2)
            .map(|pair| haversine_km(&pair[0], &pair[1]))
            .sum();

        let dlat = last.coordinates.latitude - first.coordinates.latitude;
        let dlon = last.coordinates.longitude - first.coordinates.longitude;
        let overall_bearing = ((dlat * dlat + dlon * dlon).sqrt()
            >= MIN_DISTANCE_FOR_BEARING_DEG)
            .then(|| calculate_bearing(first, last));

        Some(TrackSummary {
            point_count: self.points.len(),
            first_time: first.timestamp,
            last_time: last.timestamp,
            duration: (last.timestamp - first.timestamp)
                .to_std()
                .unwrap_or_default(),
            distance_km,
            max_altitude: self.points.iter().map(|p| p.altitude).fold(0.0, f64::max),
            max_speed: self.points.iter().map(|p| p.speed).fold(0.0, f64::max),
            any_emergency: self.points.iter().any(|p| p.in_emergency),
            overall_bearing,
        })
    }
}

/// Great-circle distance between two points in kilometers.
fn haversine_km(a: &PilotTrackPoint, b: &PilotTrackPoint) -> f64 {
    let lat1 = a.coordinates.latitude.to_radians();
    let lat2 = b.coordinates.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.coordinates.longitude - a.coordinates.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Calculate bearing between two points (flat-earth approximation).
///
/// Returns bearing in degrees (0-360), where 0 = North, 90 = East.
fn calculate_bearing(from: &PilotTrackPoint, to: &PilotTrackPoint) -> f64 {
    let dlat = to.coordinates.latitude - from.coordinates.latitude;
    let dlon = to.coordinates.longitude - from.coordinates.longitude;

    let bearing_deg = dlon.atan2(dlat).to_degrees();

    // Normalize to 0-360
    if bearing_deg < 0.0 {
        bearing_deg + 360.0
    } else {
        bearing_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::types::Coordinates;
    use chrono::TimeZone;

    fn point(minute: u32, lat: f64, lon: f64) -> PilotTrackPoint {
        PilotTrackPoint {
            pilot_name: "Ada".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 14, 17, minute, 0).unwrap(),
            coordinates: Coordinates::new(lat, lon).unwrap(),
            speed: 0.0,
            altitude: 0.0,
            in_emergency: false,
        }
    }

    fn history() -> TrackHistory {
        let mut emergency = point(20, 53.2, 10.0);
        emergency.in_emergency = true;
        emergency.altitude = 1800.0;
        let mut fast = point(10, 53.1, 10.0);
        fast.speed = 42.5;
        TrackHistory::from(vec![point(0, 53.0, 10.0), fast, emergency])
    }

    #[test]
    fn test_empty_history() {
        let history = TrackHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.summary().is_none());
    }

    #[test]
    fn test_latest_is_last_in_feed_order() {
        // Feed order wins even when timestamps go backwards.
        let history = TrackHistory::from(vec![point(30, 53.0, 10.0), point(5, 53.1, 10.1)]);
        let latest = history.latest().unwrap();
        assert!((latest.coordinates.latitude - 53.1).abs() < 1e-9);
    }

    #[test]
    fn test_between_is_inclusive() {
        let history = history();
        let start = Utc.with_ymd_and_hms(2024, 3, 14, 17, 10, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 14, 17, 20, 0).unwrap();
        assert_eq!(history.between(start, end).len(), 2);
    }

    #[test]
    fn test_emergencies() {
        let history = history();
        let emergencies = history.emergencies();
        assert_eq!(emergencies.len(), 1);
        assert_eq!(emergencies[0].altitude, 1800.0);
    }

    #[test]
    fn test_retain_latest_keeps_order() {
        let mut history = TrackHistory::from(
            (0..10)
                .map(|i| point(i, 53.0 + i as f64 * 0.01, 10.0))
                .collect::<Vec<_>>(),
        );

        assert_eq!(history.retain_latest(4), 6);
        assert_eq!(history.len(), 4);
        let oldest = &history.points()[0];
        assert!((oldest.coordinates.latitude - 53.06).abs() < 1e-9);

        assert_eq!(history.retain_latest(100), 0);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_summary() {
        let summary = history().summary().unwrap();
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.duration, Duration::from_secs(20 * 60));
        // 0.2 degrees of latitude is roughly 22.2 km
        assert!(
            (summary.distance_km - 22.24).abs() < 0.1,
            "got {} km",
            summary.distance_km
        );
        assert_eq!(summary.max_altitude, 1800.0);
        assert_eq!(summary.max_speed, 42.5);
        assert!(summary.any_emergency);
        let bearing = summary.overall_bearing.unwrap();
        assert!(bearing.abs() < 1.0, "Expected ~0°, got {}°", bearing);
    }

    #[test]
    fn test_summary_stationary_has_no_bearing() {
        let history = TrackHistory::from(vec![point(0, 53.0, 10.0), point(5, 53.0, 10.0)]);
        let summary = history.summary().unwrap();
        assert!(summary.overall_bearing.is_none());
        assert_eq!(summary.distance_km, 0.0);
    }

    #[test]
    fn test_bearing_calculation() {
        let origin = point(0, 0.0, 0.0);
        // North
        assert!((calculate_bearing(&origin, &point(1, 1.0, 0.0)) - 0.0).abs() < 0.1);
        // East
        assert!((calculate_bearing(&origin, &point(1, 0.0, 1.0)) - 90.0).abs() < 0.1);
        // South
        assert!((calculate_bearing(&origin, &point(1, -1.0, 0.0)) - 180.0).abs() < 0.1);
        // West
        assert!((calculate_bearing(&origin, &point(1, 0.0, -1.0)) - 270.0).abs() < 0.1);
    }
}
