//! Transport Configuration
//!
//! Configuration for the HTTP transport layer.

use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};
use url::Url;

/// Default user agent: crate name and version
pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Backend base URL (scheme + host, optional port and path prefix)
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl TransportConfig {
    /// Create a config for the given backend base URL
    ///
    /// Only `http` and `https` schemes are accepted and the URL must
    /// carry a host.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| AppError::bad_request(format!("Invalid base URL: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::bad_request(format!(
                "Unsupported scheme: {}",
                url.scheme()
            )));
        }

        if url.host().is_none() {
            return Err(AppError::bad_request("Base URL has no host"));
        }

        Ok(Self {
            base_url: url,
            timeout: Duration::from_secs(10),
            user_agent: APP_USER_AGENT.to_string(),
        })
    }

    /// Create a config for local development
    pub fn development() -> Self {
        Self::new("http://localhost:31113").expect("development base URL is valid")
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
