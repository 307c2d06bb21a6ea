//! Radar tile URL synthesis.
//!
//! # URL Pattern
//!
//! `{host}{path}/{size}/{z}/{x}/{y}/{color}/{smooth}_{snow}.png`
//!
//! With the fixed rendering options this becomes
//! `{host}{path}/256/{z}/{x}/{y}/3/1_0.png`.
//!
//! # Coordinate System
//!
//! Standard Web Mercator XYZ tile coordinates:
//! - X: Column (0 to 2^zoom - 1, west to east)
//! - Y: Row (0 to 2^zoom - 1, north to south)
//! - Z: Zoom level

use reqwest::Url;

use super::types::TileOverlayDescriptor;
use crate::error::{FeedError, FeedResult};

/// Capability to turn tile coordinates into an image URL.
///
/// Map renderers depend on this trait rather than on a concrete overlay
/// type, and call it lazily for each visible tile.
pub trait TileUrlSource {
    /// Returns the image URL for tile (`z`, `x`, `y`).
    fn tile_url(&self, z: u8, x: u32, y: u32) -> FeedResult<Url>;
}

impl TileUrlSource for TileOverlayDescriptor {
    fn tile_url(&self, z: u8, x: u32, y: u32) -> FeedResult<Url> {
        resolve(self, z, x, y)
    }
}

/// Builds the tile URL string without validating it.
fn build_url(descriptor: &TileOverlayDescriptor, z: u8, x: u32, y: u32) -> String {
    format!(
        "{}{}/{}/{}/{}/{}/{}/{}_{}.png",
        descriptor.origin_host,
        descriptor.tile_path_segment,
        descriptor.tile_size_pixels,
        z,
        x,
        y,
        descriptor.color_scheme,
        descriptor.smoothing_level,
        descriptor.snow_flag
    )
}

/// Resolves the image URL of tile (`z`, `x`, `y`) for `descriptor`.
///
/// Pure and deterministic. Fails with [`FeedError::MalformedUrl`] when the
/// host/path combination does not form an absolute URL with a host.
pub fn resolve(descriptor: &TileOverlayDescriptor, z: u8, x: u32, y: u32) -> FeedResult<Url> {
    let raw = build_url(descriptor, z, x, y);

    let url = Url::parse(&raw).map_err(|e| FeedError::MalformedUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if !url.has_host() {
        return Err(FeedError::MalformedUrl {
            url: raw,
            reason: "URL has no host".to_string(),
        });
    }

    // A '?' or '#' in host or path would push the tile coordinates out of the path.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(FeedError::MalformedUrl {
            url: raw,
            reason: "tile coordinates fall outside the URL path".to_string(),
        });
    }

    Ok(url)
}
