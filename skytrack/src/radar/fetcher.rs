//! Radar metadata fetcher.
//!
//! Downloads the public weather-maps metadata document and turns its most
//! recent past radar frame into a [`TileOverlayDescriptor`].

use tracing::{debug, info};

use super::types::{RadarEnvelope, TileOverlayDescriptor};
use crate::error::{FeedError, FeedResult};
use crate::http::AsyncHttpClient;

/// Default radar metadata endpoint.
pub const DEFAULT_RADAR_METADATA_URL: &str = "https://api.rainviewer.com/public/weather-maps.json";

/// Fetches radar frame metadata and selects the latest frame.
pub struct RadarFrameFetcher<C: AsyncHttpClient> {
    http_client: C,
    metadata_url: String,
}

impl<C: AsyncHttpClient> RadarFrameFetcher<C> {
    /// Creates a fetcher for the default metadata endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_metadata_url(http_client, DEFAULT_RADAR_METADATA_URL)
    }

    /// Creates a fetcher for a custom metadata endpoint.
    pub fn with_metadata_url(http_client: C, metadata_url: impl Into<String>) -> Self {
        Self {
            http_client,
            metadata_url: metadata_url.into(),
        }
    }

    /// Returns the metadata endpoint this fetcher calls.
    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    /// Fetches the metadata document and builds a descriptor for the most
    /// recent past radar frame.
    ///
    /// # Errors
    ///
    /// - [`FeedError::FetchFailed`] on transport failure or non-2xx status
    /// - [`FeedError::DecodeFailed`] when the body is not a valid envelope
    /// - [`FeedError::NotAvailable`] when there are no past frames
    pub async fn fetch_latest_frame(&self) -> FeedResult<TileOverlayDescriptor> {
        let body = self.http_client.get(&self.metadata_url).await?;
        let envelope = decode_envelope(&self.metadata_url, &body)?;
        let descriptor = select_latest(&envelope)?;

        info!(
            host = %descriptor.origin_host,
            path = %descriptor.tile_path_segment,
            capture_time = descriptor.capture_time,
            "Selected latest radar frame"
        );
        Ok(descriptor)
    }
}

fn decode_envelope(url: &str, body: &[u8]) -> FeedResult<RadarEnvelope> {
    serde_json::from_slice(body).map_err(|e| FeedError::decode(url, e.to_string()))
}

fn select_latest(envelope: &RadarEnvelope) -> FeedResult<TileOverlayDescriptor> {
    if let Some(radar) = &envelope.radar {
        debug!(
            past = radar.past.len(),
            nowcast = radar.nowcast.len(),
            "Decoded radar envelope"
        );
    }

    let frame = envelope
        .latest_past_frame()
        .ok_or(FeedError::NotAvailable)?;

    if frame.tile_path_segment.trim().is_empty() {
        debug!(capture_time = frame.capture_time, "Latest radar frame has no path");
        return Err(FeedError::NotAvailable);
    }

    Ok(TileOverlayDescriptor::from_frame(envelope.host.clone(), frame))
}
