//! Track-share feed fetcher.

use chrono::{DateTime, Utc};
use reqwest::Url;
use tracing::{debug, info, warn};

use super::format::FeedFormat;
use super::record::normalize_records;
use super::types::PilotTrackPoint;
use crate::error::{FeedError, FeedResult};
use crate::http::AsyncHttpClient;

/// Query parameter share feeds use for the start of the reporting window.
const SINCE_PARAM: &str = "d1";

/// Timestamp layout expected by the `d1` parameter, e.g. `2024-03-14T06:00z`.
const SINCE_FORMAT: &str = "%Y-%m-%dT%H:%Mz";

/// Fetches and normalizes a pilot's track-share feed.
pub struct TrackFeedFetcher<C: AsyncHttpClient> {
    http_client: C,
}

impl<C: AsyncHttpClient> TrackFeedFetcher<C> {
    /// Creates a new track fetcher.
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Fetches `feed_url` and returns its track points in feed order.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] when `feed_url` is not an absolute
    ///   http(s) URL; no request is made
    /// - [`FeedError::FetchFailed`] on transport failure
    /// - [`FeedError::DecodeFailed`] when the body has no recognizable
    ///   track structure
    pub async fn fetch_track(&self, feed_url: &str) -> FeedResult<Vec<PilotTrackPoint>> {
        let url = validate_feed_url(feed_url)?;
        self.fetch_url(url).await
    }

    /// Like [`fetch_track`](Self::fetch_track) but asks the feed for every
    /// report since `since` rather than only the latest one.
    pub async fn fetch_track_since(
        &self,
        feed_url: &str,
        since: DateTime<Utc>,
    ) -> FeedResult<Vec<PilotTrackPoint>> {
        let url = with_since(validate_feed_url(feed_url)?, since);
        self.fetch_url(url).await
    }

    async fn fetch_url(&self, url: Url) -> FeedResult<Vec<PilotTrackPoint>> {
        let body = self.http_client.get(url.as_str()).await?;
        let points = decode_track(url.as_str(), &body)?;

        info!(url = %url, points = points.len(), "Loaded pilot track");
        Ok(points)
    }
}

/// Checks that `feed_url` can be requested.
pub fn validate_feed_url(feed_url: &str) -> FeedResult<Url> {
    let invalid = |reason: String| FeedError::InvalidUrl {
        url: feed_url.to_string(),
        reason,
    };

    let url = Url::parse(feed_url.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if !url.has_host() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(url)
}

fn with_since(mut url: Url, since: DateTime<Utc>) -> Url {
    let existing: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SINCE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(existing)
        .append_pair(SINCE_PARAM, &since.format(SINCE_FORMAT).to_string());
    url
}

/// Decodes a feed body into normalized points.
///
/// Malformed records are skipped; only a body with no recognizable track
/// structure is an error.
pub fn decode_track(url: &str, body: &[u8]) -> FeedResult<Vec<PilotTrackPoint>> {
    let text = String::from_utf8_lossy(body);

    let format = FeedFormat::detect(&text)
        .ok_or_else(|| FeedError::decode(url, "no recognizable track structure"))?;
    debug!(url = url, format = %format, "Detected track feed format");

    let records = format.parse(&text).map_err(|reason| {
        warn!(url = url, format = %format, reason = %reason, "Track feed unreadable");
        FeedError::decode(url, format!("{} feed: {}", format, reason))
    })?;

    let points = normalize_records(&records);
    if points.len() < records.len() {
        debug!(
            url = url,
            skipped = records.len() - points.len(),
            kept = points.len(),
            "Skipped unusable track records"
        );
    }
    Ok(points)
}
