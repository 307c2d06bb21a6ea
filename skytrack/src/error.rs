//! Error types shared by the radar and track feeds.

use thiserror::Error;

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while fetching and decoding feeds.
///
/// None of these are fatal: every fetch can be retried by triggering it
/// again, and the previously stored overlay/track state stays visible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// The supplied feed URL is not usable. No request was made.
    #[error("invalid feed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failure or non-success HTTP status.
    #[error("fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// A response arrived but did not have the expected structure.
    #[error("could not decode response from {url}: {reason}")]
    DecodeFailed { url: String, reason: String },

    /// The response was well formed but carried no radar frames.
    #[error("no radar frames available")]
    NotAvailable,

    /// A tile URL could not be constructed from the overlay descriptor.
    #[error("malformed tile URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },
}

impl FeedError {
    /// Returns true when the error reflects an empty dataset rather than a failure.
    pub fn is_not_available(&self) -> bool {
        matches!(self, FeedError::NotAvailable)
    }

    /// Returns true when no network I/O was attempted before failing.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FeedError::InvalidUrl { .. } | FeedError::MalformedUrl { .. }
        )
    }

    pub(crate) fn decode(url: &str, reason: impl Into<String>) -> Self {
        FeedError::DecodeFailed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fetch(url: &str, reason: impl Into<String>) -> Self {
        FeedError::FetchFailed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
