//! Weather radar overlays.
//!
//! This module discovers the latest radar frame from a public metadata
//! endpoint and synthesizes tile image URLs for it.
//!
//! # Example
//!
//! ```ignore
//! use skytrack::http::AsyncReqwestClient;
//! use skytrack::radar::{RadarFrameFetcher, TileUrlSource};
//!
//! let fetcher = RadarFrameFetcher::new(AsyncReqwestClient::new()?);
//! let descriptor = fetcher.fetch_latest_frame().await?;
//! let url = descriptor.tile_url(5, 3, 2)?;
//! ```

mod fetcher;
mod tile;
mod types;

pub use fetcher::{RadarFrameFetcher, DEFAULT_RADAR_METADATA_URL};
pub use tile::{resolve, TileUrlSource};
pub use types::{
    RadarEnvelope, RadarFrame, RadarFrames, SatelliteFrames, TileOverlayDescriptor,
    COLOR_SCHEME, SMOOTHING_LEVEL, SNOW_FLAG, TILE_SIZE_PIXELS,
};
