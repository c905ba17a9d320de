//! HTTP Transport
//!
//! Thin wrapper around `reqwest` that owns the cookie jar carrying the
//! session credential. Application code issues requests by path; the
//! jar attaches and renews the HTTP-only cookie on its own and is never
//! readable from outside this module.

use http::Method;
use kernel::error::app_error::{AppError, AppResult};
use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::config::TransportConfig;

/// HTTP transport with an internal cookie jar
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Build a transport from a config
    pub fn new(config: TransportConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Backend base URL
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Resolve an endpoint path against the base URL
    ///
    /// The path must be absolute (`/auth/me`); it is appended to any
    /// path prefix carried by the base URL.
    pub fn endpoint_url(&self, path: &str) -> AppResult<Url> {
        if !path.starts_with('/') {
            return Err(AppError::bad_request(format!(
                "Endpoint path must start with '/': {path}"
            )));
        }

        let mut url = self.config.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);

        Ok(url)
    }

    /// Issue a GET request
    pub async fn get(&self, path: &str) -> AppResult<Response> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// Issue a POST request with an empty body
    pub async fn post(&self, path: &str) -> AppResult<Response> {
        self.send(Method::POST, path, None::<&()>).await
    }

    /// Issue a POST request with a JSON body
    pub async fn post_json<B>(&self, path: &str, body: &B) -> AppResult<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Issue a request; the building block for the helpers above and
    /// for replayed requests
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint_url(path)?;

        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(TransportConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_url_plain_base() {
        let t = transport("http://portal.example.com");
        let url = t.endpoint_url("/auth/me").unwrap();
        assert_eq!(url.as_str(), "http://portal.example.com/auth/me");
    }

    #[test]
    fn test_endpoint_url_keeps_base_prefix() {
        let t = transport("https://portal.example.com/api/");
        let url = t.endpoint_url("/auth/refresh").unwrap();
        assert_eq!(url.as_str(), "https://portal.example.com/api/auth/refresh");
    }

    #[test]
    fn test_endpoint_url_keeps_port() {
        let t = transport("http://localhost:31113");
        let url = t.endpoint_url("/auth/login").unwrap();
        assert_eq!(url.as_str(), "http://localhost:31113/auth/login");
    }

    #[test]
    fn test_endpoint_url_rejects_relative_path() {
        let t = transport("http://portal.example.com");
        assert!(t.endpoint_url("auth/me").is_err());
    }
}
