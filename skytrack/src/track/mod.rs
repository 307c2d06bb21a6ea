//! Pilot track-share feeds.
//!
//! Fetches a single device's share feed, detects its wire format (KML, GPX
//! or JSON) and normalizes every usable record into a [`PilotTrackPoint`].
//!
//! ```text
//! GET feed ──► FeedFormat::detect ──► RawTrackRecord* ──► PilotTrackPoint*
//!                                     (per format)        (shared rules)
//! ```
//!
//! Malformed records are skipped individually; only a response with no
//! recognizable structure fails the whole fetch.

mod fetcher;
mod format;
mod gpx;
mod history;
mod json;
mod kml;
mod record;
mod types;
mod xml;

pub use fetcher::{decode_track, validate_feed_url, TrackFeedFetcher};
pub use format::FeedFormat;
pub use history::{TrackHistory, TrackSummary};
pub use record::{RawTrackRecord, SkipReason};
pub use types::{Coordinates, PilotTrackPoint};
