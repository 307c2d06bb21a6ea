//! Radar metadata envelope and overlay descriptor types.

use serde::Deserialize;

/// Tile edge length requested from the tile server, in pixels.
pub const TILE_SIZE_PIXELS: u32 = 256;

/// Color scheme index used for radar tiles.
pub const COLOR_SCHEME: u8 = 3;

/// Smoothing level applied by the tile server (1 = smoothed).
pub const SMOOTHING_LEVEL: u8 = 1;

/// Snow rendering flag (0 = rain colors only).
pub const SNOW_FLAG: u8 = 0;

/// A single radar frame as published by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RadarFrame {
    /// Capture time, Unix epoch seconds.
    #[serde(rename = "time")]
    pub capture_time: i64,
    /// Path segment appended to the envelope host, e.g. `/v2/radar/1700000000`.
    #[serde(rename = "path")]
    pub tile_path_segment: String,
}

/// Radar section of the envelope. Frames are ordered oldest to newest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RadarFrames {
    #[serde(default)]
    pub past: Vec<RadarFrame>,
    #[serde(default)]
    pub nowcast: Vec<RadarFrame>,
}

/// Satellite section of the envelope. Decoded but never surfaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SatelliteFrames {
    #[serde(default)]
    pub infrared: Vec<RadarFrame>,
}

/// Top-level metadata response.
#[derive(Debug, Clone, Deserialize)]
pub struct RadarEnvelope {
    pub host: String,
    #[serde(default)]
    pub radar: Option<RadarFrames>,
    #[serde(default)]
    pub satellite: Option<SatelliteFrames>,
}

impl RadarEnvelope {
    /// Returns the most recent past frame by feed order.
    ///
    /// The feed is trusted to be time-ordered; timestamps are not compared.
    pub fn latest_past_frame(&self) -> Option<&RadarFrame> {
        self.radar.as_ref().and_then(|radar| radar.past.last())
    }
}

/// Everything a map renderer needs to request radar tiles for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOverlayDescriptor {
    pub origin_host: String,
    pub tile_path_segment: String,
    pub tile_size_pixels: u32,
    pub color_scheme: u8,
    pub smoothing_level: u8,
    pub snow_flag: u8,
    /// Capture time of the source frame. Not part of the tile URL.
    pub capture_time: i64,
}

impl TileOverlayDescriptor {
    /// Builds a descriptor for `frame` served from `host`, using the fixed
    /// tile rendering options.
    pub fn from_frame(host: impl Into<String>, frame: &RadarFrame) -> Self {
        Self {
            origin_host: host.into(),
            tile_path_segment: frame.tile_path_segment.clone(),
            tile_size_pixels: TILE_SIZE_PIXELS,
            color_scheme: COLOR_SCHEME,
            smoothing_level: SMOOTHING_LEVEL,
            snow_flag: SNOW_FLAG,
            capture_time: frame.capture_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_radar_section() {
        let envelope: RadarEnvelope =
            serde_json::from_str(r#"{"host":"https://tiles.example"}"#).unwrap();
        assert!(envelope.radar.is_none());
        assert!(envelope.latest_past_frame().is_none());
    }

    #[test]
    fn test_envelope_ignores_unknown_keys() {
        let json = r#"{
            "version": "2.0",
            "generated": 1700000600,
            "host": "https://tiles.example",
            "radar": {"past": [{"time": 1700000000, "path": "/v2/radar/1700000000"}]},
            "satellite": {"infrared": [{"time": 1700000000, "path": "/v2/satellite/abc"}]}
        }"#;
        let envelope: RadarEnvelope = serde_json::from_str(json).unwrap();
        let radar = envelope.radar.as_ref().unwrap();
        assert_eq!(radar.past.len(), 1);
        assert!(radar.nowcast.is_empty());
        assert_eq!(envelope.satellite.unwrap().infrared.len(), 1);
    }

    #[test]
    fn test_latest_past_frame_uses_feed_order() {
        // Deliberately out of time order: the last entry still wins.
        let json = r#"{"host":"h","radar":{"past":[
            {"time": 300, "path": "/a"},
            {"time": 100, "path": "/b"}
        ]}}"#;
        let envelope: RadarEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.latest_past_frame().unwrap().tile_path_segment, "/b");
    }

    #[test]
    fn test_descriptor_uses_fixed_options() {
        let frame = RadarFrame {
            capture_time: 42,
            tile_path_segment: "/v2/radar/42".to_string(),
        };
        let descriptor = TileOverlayDescriptor::from_frame("https://tiles.example", &frame);
        assert_eq!(descriptor.tile_size_pixels, 256);
        assert_eq!(descriptor.color_scheme, 3);
        assert_eq!(descriptor.smoothing_level, 1);
        assert_eq!(descriptor.snow_flag, 0);
        assert_eq!(descriptor.capture_time, 42);
    }
}
