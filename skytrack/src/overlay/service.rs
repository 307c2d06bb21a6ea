//! Explicit refresh operations tying the fetchers to the coordinator.
//!
//! The presentation layer calls [`OverlayService::refresh_radar`] or
//! [`OverlayService::load_track`] in response to a user action. Each call is
//! an independent, sequential GET → decode → normalize → store chain. Calls
//! may overlap; there is no deduplication and whichever finishes last wins.
//! A failed call leaves the previously stored state visible.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::coordinator::OverlayCoordinator;
use crate::error::{FeedError, FeedResult};
use crate::http::AsyncHttpClient;
use crate::radar::{RadarFrameFetcher, TileOverlayDescriptor};
use crate::track::{PilotTrackPoint, TrackFeedFetcher, TrackHistory};

/// Default upper bound on stored track points.
pub const DEFAULT_MAX_TRACK_POINTS: usize = 10_000;

/// Fetch-and-store operations over a shared [`OverlayCoordinator`].
pub struct OverlayService<C: AsyncHttpClient + Clone> {
    radar: RadarFrameFetcher<C>,
    track: TrackFeedFetcher<C>,
    coordinator: Arc<OverlayCoordinator>,
    max_track_points: usize,
}

impl<C: AsyncHttpClient + Clone> OverlayService<C> {
    /// Create a service using the default radar endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_radar_fetcher(http_client.clone(), RadarFrameFetcher::new(http_client))
    }

    /// Create a service with a custom radar metadata endpoint.
    pub fn with_metadata_url(http_client: C, metadata_url: impl Into<String>) -> Self {
        let radar = RadarFrameFetcher::with_metadata_url(http_client.clone(), metadata_url);
        Self::with_radar_fetcher(http_client, radar)
    }

    fn with_radar_fetcher(http_client: C, radar: RadarFrameFetcher<C>) -> Self {
        Self {
            radar,
            track: TrackFeedFetcher::new(http_client),
            coordinator: Arc::new(OverlayCoordinator::new()),
            max_track_points: DEFAULT_MAX_TRACK_POINTS,
        }
    }

    /// Bound the number of stored track points (most recent are kept).
    pub fn with_max_track_points(mut self, max: usize) -> Self {
        self.max_track_points = max;
        self
    }

    /// Shared handle for readers of the current state.
    pub fn coordinator(&self) -> Arc<OverlayCoordinator> {
        Arc::clone(&self.coordinator)
    }

    /// Fetch the latest radar frame and display it.
    ///
    /// On any error, including [`FeedError::NotAvailable`], the current
    /// overlays are left unchanged and the error is returned.
    pub async fn refresh_radar(&self) -> FeedResult<TileOverlayDescriptor> {
        match self.radar.fetch_latest_frame().await {
            Ok(descriptor) => {
                self.coordinator.set_overlays(vec![descriptor.clone()]);
                Ok(descriptor)
            }
            Err(FeedError::NotAvailable) => {
                info!("No radar frames available, keeping current overlays");
                Err(FeedError::NotAvailable)
            }
            Err(e) => {
                warn!(error = %e, "Radar refresh failed");
                Err(e)
            }
        }
    }

    /// Fetch `feed_url` and replace the displayed track with its points.
    ///
    /// Returns the stored history. On error the current track is kept.
    pub async fn load_track(&self, feed_url: &str) -> FeedResult<Arc<TrackHistory>> {
        let result = self.track.fetch_track(feed_url).await;
        self.store_track(feed_url, result)
    }

    /// Like [`load_track`](Self::load_track), requesting reports since `since`.
    pub async fn load_track_since(
        &self,
        feed_url: &str,
        since: DateTime<Utc>,
    ) -> FeedResult<Arc<TrackHistory>> {
        let result = self.track.fetch_track_since(feed_url, since).await;
        self.store_track(feed_url, result)
    }

    fn store_track(
        &self,
        feed_url: &str,
        result: FeedResult<Vec<PilotTrackPoint>>,
    ) -> FeedResult<Arc<TrackHistory>> {
        let points = result.inspect_err(|e| {
            warn!(url = feed_url, error = %e, "Track load failed, keeping current track");
        })?;

        let mut history = TrackHistory::from(points);
        let dropped = history.retain_latest(self.max_track_points);
        if dropped > 0 {
            info!(
                dropped = dropped,
                max = self.max_track_points,
                "Track history truncated to most recent points"
            );
        }

        Ok(self.coordinator.set_tracks(history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockAsyncHttpClient;

    const META_URL: &str = "https://meta.example/maps.json";
    const FEED_A: &str = "https://share.example.com/Feed/Share/a";
    const FEED_B: &str = "https://share.example.com/Feed/Share/b";

    fn json_feed(name: &str, count: usize) -> String {
        let points: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"name":"{}","time":{},"lat":46.{},"lon":7.9}}"#,
                    name,
                    1_710_437_460 + i * 60,
                    i
                )
            })
            .collect();
        format!("[{}]", points.join(","))
    }

    #[tokio::test]
    async fn test_refresh_radar_stores_descriptor() {
        let body = r#"{"host":"https://r.example","radar":{"past":[{"time":100,"path":"/v2/a"},{"time":200,"path":"/v2/b"}]}}"#;
        let service = OverlayService::with_metadata_url(MockAsyncHttpClient::ok(body), META_URL);

        let descriptor = service.refresh_radar().await.unwrap();
        let overlays = service.coordinator().current_overlays();
        assert_eq!(overlays.as_slice(), &[descriptor]);
    }

    #[tokio::test]
    async fn test_not_available_keeps_previous_overlays() {
        let good = r#"{"host":"https://r.example","radar":{"past":[{"time":100,"path":"/v2/a"}]}}"#;
        let empty = r#"{"host":"https://r.example","radar":{"past":[]}}"#;

        let first = OverlayService::with_metadata_url(MockAsyncHttpClient::ok(good), META_URL);
        first.refresh_radar().await.unwrap();
        let coordinator = first.coordinator();

        // Same coordinator, new response: rebuild the service around it.
        let second = OverlayService {
            coordinator: Arc::clone(&coordinator),
            ..OverlayService::with_metadata_url(MockAsyncHttpClient::ok(empty), META_URL)
        };
        assert_eq!(second.refresh_radar().await, Err(FeedError::NotAvailable));

        let overlays = coordinator.current_overlays();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].tile_path_segment, "/v2/a");
    }

    #[tokio::test]
    async fn test_reload_overwrites_track() {
        let mock = MockAsyncHttpClient::ok("[]")
            .with_route(FEED_A, &json_feed("Ada", 3))
            .with_route(FEED_B, &json_feed("Bea", 2));
        let service = OverlayService::new(mock);

        service.load_track(FEED_A).await.unwrap();
        assert_eq!(service.coordinator().current_tracks().len(), 3);

        service.load_track(FEED_B).await.unwrap();
        let points = service.coordinator().current_track_points();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.pilot_name == "Bea"));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_track() {
        let mock = MockAsyncHttpClient::ok("<html/>").with_route(FEED_A, &json_feed("Ada", 2));
        let service = OverlayService::new(mock);

        service.load_track(FEED_A).await.unwrap();
        let result = service.load_track(FEED_B).await;
        assert!(matches!(result, Err(FeedError::DecodeFailed { .. })));

        let invalid = service.load_track("::not-a-url").await;
        assert!(matches!(invalid, Err(FeedError::InvalidUrl { .. })));

        assert_eq!(service.coordinator().current_tracks().len(), 2);
    }

    #[tokio::test]
    async fn test_load_returns_its_own_history() {
        let mock = MockAsyncHttpClient::ok("[]").with_route(FEED_A, &json_feed("Ada", 3));
        let service = OverlayService::new(mock);

        let loaded = service.load_track(FEED_A).await.unwrap();
        assert!(Arc::ptr_eq(&loaded, &service.coordinator().current_tracks()));

        // A later replacement does not alter what the earlier load returned.
        service.coordinator().set_tracks(TrackHistory::new());
        assert_eq!(loaded.len(), 3);
        assert!(loaded.iter().all(|p| p.pilot_name == "Ada"));
    }

    #[tokio::test]
    async fn test_track_is_bounded_to_most_recent() {
        let mock = MockAsyncHttpClient::ok(&json_feed("Ada", 5));
        let service = OverlayService::new(mock).with_max_track_points(2);

        let history = service.load_track(FEED_A).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!((history.points()[0].coordinates.latitude - 46.3).abs() < 1e-9);
        assert!((history.points()[1].coordinates.latitude - 46.4).abs() < 1e-9);
    }
}
