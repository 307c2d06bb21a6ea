//! JSON feed parser.
//!
//! Accepts either a top-level array of point objects or an object with a
//! `points` array. Each element is deserialized on its own so that one bad
//! element only drops that record.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::record::RawTrackRecord;

/// A number or a string, as loosely typed feeds mix both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonPoint {
    #[serde(default, alias = "pilot", alias = "pilotName")]
    name: Option<String>,
    #[serde(default, alias = "timestamp")]
    time: Option<Scalar>,
    #[serde(default, alias = "latitude")]
    lat: Option<Scalar>,
    #[serde(default, alias = "lng", alias = "longitude")]
    lon: Option<Scalar>,
    #[serde(default, alias = "velocity")]
    speed: Option<Scalar>,
    #[serde(default, alias = "elevation", alias = "alt")]
    altitude: Option<Scalar>,
    #[serde(default, alias = "inEmergency")]
    emergency: Option<Scalar>,
}

impl JsonPoint {
    fn into_record(self) -> RawTrackRecord {
        RawTrackRecord {
            pilot_name: self.name,
            timestamp: self.time.and_then(timestamp_text),
            latitude: self.lat.map(Scalar::into_text),
            longitude: self.lon.map(Scalar::into_text),
            speed: self.speed.map(Scalar::into_text),
            altitude: self.altitude.map(Scalar::into_text),
            in_emergency: self.emergency.map(Scalar::into_text),
        }
    }
}

/// Epoch seconds are converted to RFC 3339 so normalization sees one format.
fn timestamp_text(time: Scalar) -> Option<String> {
    match time {
        Scalar::Number(secs) if secs.fract() == 0.0 => {
            DateTime::from_timestamp(secs as i64, 0).map(|ts| ts.to_rfc3339())
        }
        Scalar::Text(s) => Some(s),
        _ => None,
    }
}

/// Parses a JSON document into raw records.
pub(super) fn parse(body: &str) -> Result<Vec<RawTrackRecord>, String> {
    let document: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;

    let elements = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("points") {
            Some(Value::Array(items)) => items,
            _ => return Err("expected a 'points' array".to_string()),
        },
        _ => return Err("expected an array of points".to_string()),
    };

    let records = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match serde_json::from_value::<JsonPoint>(element) {
            Ok(point) => point.into_record(),
            Err(e) => {
                debug!(index = index, error = %e, "Unreadable JSON track record");
                RawTrackRecord::default()
            }
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_of_points() {
        let body = r#"[
            {"name": "Ada", "time": "2024-03-14T17:21:00Z", "lat": 46.5, "lon": 7.9, "speed": 31.0, "altitude": 2150, "emergency": false},
            {"pilot": "Ada", "timestamp": 1710437460, "latitude": "46.51", "lng": "7.95"}
        ]"#;
        let records = parse(body).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].pilot_name.as_deref(), Some("Ada"));
        assert_eq!(records[0].latitude.as_deref(), Some("46.5"));
        assert_eq!(records[0].altitude.as_deref(), Some("2150"));
        assert_eq!(records[0].in_emergency.as_deref(), Some("false"));

        assert_eq!(records[1].pilot_name.as_deref(), Some("Ada"));
        assert_eq!(
            records[1].timestamp.as_deref(),
            Some("2024-03-14T17:31:00+00:00")
        );
        assert_eq!(records[1].longitude.as_deref(), Some("7.95"));
        assert!(records[1].speed.is_none());
    }

    #[test]
    fn test_points_object() {
        let body = r#"{"pilot": "ignored", "points": [{"name": "Ada", "lat": 1, "lon": 2}]}"#;
        let records = parse(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].longitude.as_deref(), Some("2"));
    }

    #[test]
    fn test_bad_element_becomes_empty_record() {
        let body = r#"[{"name": ["not", "a", "string"]}, 42, {"name": "Ada"}]"#;
        let records = parse(body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], RawTrackRecord::default());
        assert_eq!(records[1], RawTrackRecord::default());
        assert_eq!(records[2].pilot_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_unrecognized_structure() {
        assert!(parse(r#"{"tracks": []}"#).is_err());
        assert!(parse("\"text\"").is_err());
        assert!(parse("[{").is_err());
    }
}
