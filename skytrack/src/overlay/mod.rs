//! Displayed overlay state and the refresh operations that update it.
//!
//! # Architecture
//!
//! ```text
//! UI action ──► OverlayService ──► fetchers (network) ──► OverlayCoordinator ──► renderer / list
//!               refresh_radar()                           set_overlays()          current_overlays()
//!               load_track(url)                           set_tracks()            subscribe_tracks()
//! ```

mod coordinator;
mod service;

pub use coordinator::{CollectionState, OverlayCoordinator};
pub use service::{OverlayService, DEFAULT_MAX_TRACK_POINTS};
