//! Refresh-and-Retry Interceptor
//!
//! Client for authenticated (non-auth) API calls. A 401 on a data
//! request means the access credential expired mid-session; the
//! interceptor renews it once and replays the request once. A second
//! 401, or a failed renewal, expires the session locally.
//!
//! Loops are ruled out structurally: renewal goes through the auth API,
//! whose endpoints never pass through this client, and the exempt-path
//! check backstops that.

use std::sync::Arc;

use http::Method;
use kernel::error::app_error::AppError;
use platform::http::HttpTransport;
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::api::AuthApi;
use crate::error::{SessionError, SessionResult};
use crate::infra::http::{is_auth_path, read_error, transport_error};
use crate::store::SessionStore;

/// Lifecycle of a single intercepted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestPhase {
    /// First attempt in flight
    Sent,
    /// 401 received; credential renewal in flight
    Refreshing,
    /// Renewal succeeded; replay in flight
    Retried,
    /// Renewal or replay failed; session expired
    Failed,
}

/// Transport wrapper for data endpoints
pub struct AuthorizedClient<A>
where
    A: AuthApi,
{
    transport: Arc<HttpTransport>,
    api: Arc<A>,
    store: Arc<SessionStore>,
}

impl<A> AuthorizedClient<A>
where
    A: AuthApi,
{
    pub fn new(transport: Arc<HttpTransport>, api: Arc<A>, store: Arc<SessionStore>) -> Self {
        Self {
            transport,
            api,
            store,
        }
    }

    /// GET a JSON resource
    pub async fn get_json<T>(&self, path: &str) -> SessionResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(Method::GET, path, None).await?;
        decode(response).await
    }

    /// POST a JSON body and decode a JSON reply
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> SessionResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        // Serialized up front so the replay sends identical bytes
        let body = serde_json::to_value(body).map_err(AppError::from)?;
        let response = self.execute(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    /// Issue the request, refreshing and replaying once on a 401
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> SessionResult<Response> {
        tracing::trace!(%method, path, phase = ?RequestPhase::Sent, "Dispatching request");
        let response = self
            .transport
            .send(method.clone(), path, body.as_ref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED || is_auth_path(path) {
            return Ok(response);
        }

        tracing::debug!(
            %method,
            path,
            phase = ?RequestPhase::Refreshing,
            "Access credential expired; renewing session"
        );
        if let Err(error) = self.api.refresh().await {
            error.log();
            return Err(self.expire(&method, path));
        }

        tracing::debug!(%method, path, phase = ?RequestPhase::Retried, "Replaying request");
        let response = self
            .transport
            .send(method.clone(), path, body.as_ref())
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(self.expire(&method, path));
        }

        Ok(response)
    }

    /// Renewal failed for good; the session is over
    fn expire(&self, method: &Method, path: &str) -> SessionError {
        tracing::warn!(
            %method,
            path,
            phase = ?RequestPhase::Failed,
            "Session renewal failed; clearing local state"
        );
        self.store.set_anonymous();
        SessionError::Unauthenticated
    }
}

/// Decode a terminal response into the caller's type
async fn decode<T>(response: Response) -> SessionResult<T>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        let (status, body) = read_error(response).await;
        return Err(transport_error(status, body));
    }
    Ok(response.json().await.map_err(AppError::from)?)
}
