//! Current overlay and track state.
//!
//! The coordinator is the single place the presentation layer reads from.
//! Updates are whole-value replacements published through `watch` channels,
//! so a reader either sees the previous collection or the new one, never a
//! partial mix. Subscribers are notified on every replacement.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::radar::TileOverlayDescriptor;
use crate::track::{PilotTrackPoint, TrackHistory};

/// Whether a collection has been populated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    Empty,
    Populated,
}

impl CollectionState {
    fn of(is_empty: bool) -> Self {
        if is_empty {
            CollectionState::Empty
        } else {
            CollectionState::Populated
        }
    }
}

/// Holds the overlays and track currently on display.
#[derive(Debug)]
pub struct OverlayCoordinator {
    overlays: watch::Sender<Arc<Vec<TileOverlayDescriptor>>>,
    tracks: watch::Sender<Arc<TrackHistory>>,
}

impl Default for OverlayCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayCoordinator {
    /// Create a coordinator with both collections empty.
    pub fn new() -> Self {
        let (overlays, _) = watch::channel(Arc::new(Vec::new()));
        let (tracks, _) = watch::channel(Arc::new(TrackHistory::new()));
        Self { overlays, tracks }
    }

    /// Replace the displayed overlays.
    pub fn set_overlays(&self, overlays: Vec<TileOverlayDescriptor>) {
        debug!(count = overlays.len(), "Replacing radar overlays");
        self.overlays.send_replace(Arc::new(overlays));
    }

    /// Replace the displayed track, returning the published snapshot.
    pub fn set_tracks(&self, tracks: impl Into<TrackHistory>) -> Arc<TrackHistory> {
        let tracks = Arc::new(tracks.into());
        debug!(count = tracks.len(), "Replacing pilot track");
        self.tracks.send_replace(Arc::clone(&tracks));
        tracks
    }

    /// Snapshot of the displayed overlays.
    pub fn current_overlays(&self) -> Arc<Vec<TileOverlayDescriptor>> {
        self.overlays.borrow().clone()
    }

    /// Snapshot of the displayed track.
    pub fn current_tracks(&self) -> Arc<TrackHistory> {
        self.tracks.borrow().clone()
    }

    /// Displayed track points in feed order.
    pub fn current_track_points(&self) -> Vec<PilotTrackPoint> {
        self.current_tracks().points().to_vec()
    }

    pub fn overlay_state(&self) -> CollectionState {
        CollectionState::of(self.overlays.borrow().is_empty())
    }

    pub fn track_state(&self) -> CollectionState {
        CollectionState::of(self.tracks.borrow().is_empty())
    }

    /// Receiver notified whenever the overlays are replaced.
    pub fn subscribe_overlays(&self) -> watch::Receiver<Arc<Vec<TileOverlayDescriptor>>> {
        self.overlays.subscribe()
    }

    /// Receiver notified whenever the track is replaced.
    pub fn subscribe_tracks(&self) -> watch::Receiver<Arc<TrackHistory>> {
        self.tracks.subscribe()
    }
}
