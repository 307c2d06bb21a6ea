//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::error::FeedError;

/// Default User-Agent string for HTTP requests.
/// Some share-feed hosts reject requests without a browser-like User-Agent.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes, or `FeedError::FetchFailed` on transport
    /// failure or a non-success status.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FeedError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new client relying on the transport's default timeout.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_timeout(None)
    }

    /// Creates a new client with an optional request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            FeedError::fetch("", format!("Failed to create async HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(FeedError::fetch(url, format!("Request failed: {}", e)));
            }
        };

        // Check HTTP status
        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(FeedError::fetch(url, format!("HTTP {}", response.status())));
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(FeedError::fetch(
                    url,
                    format!("Failed to read response: {}", e),
                ))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use parking_lot::Mutex;

    /// Mock async HTTP client for testing.
    ///
    /// Returns `response` for every URL unless a route was registered for it.
    /// Requested URLs are recorded so tests can assert on network activity.
    #[derive(Clone)]
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, FeedError>,
        pub routes: HashMap<String, Result<Vec<u8>, FeedError>>,
        pub requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockAsyncHttpClient {
        pub fn new(response: Result<Vec<u8>, FeedError>) -> Self {
            Self {
                response,
                routes: HashMap::new(),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn ok(body: &str) -> Self {
            Self::new(Ok(body.as_bytes().to_vec()))
        }

        pub fn with_route(mut self, url: &str, body: &str) -> Self {
            self.routes
                .insert(url.to_string(), Ok(body.as_bytes().to_vec()));
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().len()
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().clone()
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, FeedError> {
            self.requests.lock().push(url.to_string());
            self.routes
                .get(url)
                .cloned()
                .unwrap_or_else(|| self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_mock_async_client_success() {
        let mock = MockAsyncHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_async_client_error() {
        let mock = MockAsyncHttpClient::new(Err(FeedError::fetch(
            "http://example.com",
            "Test error",
        )));

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_routes_by_url() {
        let mock = MockAsyncHttpClient::ok("default").with_route("http://a.example", "routed");

        assert_eq!(mock.get("http://a.example").await.unwrap(), b"routed");
        assert_eq!(mock.get("http://b.example").await.unwrap(), b"default");
        assert_eq!(
            mock.requested_urls(),
            vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );
    }

    #[test]
    fn test_client_construction() {
        assert!(AsyncReqwestClient::new().is_ok());
        assert!(AsyncReqwestClient::with_timeout(Some(Duration::from_secs(5))).is_ok());
    }
}
