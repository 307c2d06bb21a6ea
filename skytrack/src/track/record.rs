//! Format-independent raw records and their normalization.
//!
//! Each feed parser extracts the textual fields it finds into a
//! [`RawTrackRecord`]; normalization into a [`PilotTrackPoint`] is shared so
//! that every format follows the same skip/default rules:
//!
//! - pilot name, timestamp and coordinates are required, the record is
//!   skipped when any is missing or unreadable
//! - speed and altitude default to `0.0`
//! - emergency defaults to `false`

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use super::types::{Coordinates, PilotTrackPoint};

/// Timestamp layout used by share-feed `Time UTC` fields, e.g. `3/14/2024 5:21:00 PM`.
const SHARE_FEED_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Unnormalized field values of one feed record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrackRecord {
    pub pilot_name: Option<String>,
    pub timestamp: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub speed: Option<String>,
    pub altitude: Option<String>,
    pub in_emergency: Option<String>,
}

/// Why a record was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingPilotName,
    MissingTimestamp,
    MissingCoordinates,
}

impl RawTrackRecord {
    /// Normalizes the record into a track point.
    pub fn normalize(&self) -> Result<PilotTrackPoint, SkipReason> {
        let pilot_name = self
            .pilot_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(SkipReason::MissingPilotName)?
            .to_string();

        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .ok_or(SkipReason::MissingTimestamp)?;

        let latitude = self.latitude.as_deref().and_then(parse_leading_number);
        let longitude = self.longitude.as_deref().and_then(parse_leading_number);
        let coordinates = latitude
            .zip(longitude)
            .and_then(|(lat, lon)| Coordinates::new(lat, lon))
            .ok_or(SkipReason::MissingCoordinates)?;

        Ok(PilotTrackPoint {
            pilot_name,
            timestamp,
            coordinates,
            speed: self
                .speed
                .as_deref()
                .and_then(parse_leading_number)
                .unwrap_or(0.0),
            altitude: self
                .altitude
                .as_deref()
                .and_then(parse_leading_number)
                .unwrap_or(0.0),
            in_emergency: self
                .in_emergency
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(false),
        })
    }
}

/// Normalizes records in order, dropping the ones that cannot be used.
pub fn normalize_records(records: &[RawTrackRecord]) -> Vec<PilotTrackPoint> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.normalize() {
            Ok(point) => Some(point),
            Err(reason) => {
                debug!(index = index, reason = ?reason, "Skipping track record");
                None
            }
        })
        .collect()
}

/// Parses the leading number of a value such as `"12.0 km/h"` or
/// `"1234.56 m from MSL"`.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let token = value.split_whitespace().next()?;
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an RFC 3339 timestamp or the share-feed `Time UTC` layout.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, SHARE_FEED_TIME_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses boolean flags written as `True`/`False`, `true`/`false` or `1`/`0`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
