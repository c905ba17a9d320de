//! HTTP Auth API
//!
//! `AuthApi` implementation over the platform transport. These are the
//! auth endpoints themselves, so they are never routed through the
//! interceptor: a 401 here is an answer, not a trigger for renewal.

use std::sync::Arc;

use kernel::error::app_error::AppError;
use platform::http::HttpTransport;
use reqwest::Response;

use crate::domain::api::{AuthApi, LoginOutcome};
use crate::dto::{
    ApiErrorBody, BackupCodeRequest, IdentityPayload, LoginReply, LoginRequest,
    MFA_SETUP_REQUIRED_CODE, TotpVerifyRequest,
};
use crate::error::{SessionError, SessionResult};

pub const ME_PATH: &str = "/auth/me";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const MFA_VERIFY_PATH: &str = "/auth/mfa/verify";
pub const MFA_BACKUP_PATH: &str = "/auth/mfa/use-backup-code";

/// Whether a 401 on this path must be taken at face value instead of
/// triggering a refresh
pub(crate) fn is_auth_path(path: &str) -> bool {
    path == ME_PATH || path.starts_with("/auth/")
}

/// Read a non-success response into its status and error body
///
/// The body is best effort; backends under load return empty or
/// non-JSON bodies and those must not mask the status code.
pub(crate) async fn read_error(response: Response) -> (u16, ApiErrorBody) {
    let status = response.status().as_u16();
    let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
    (status, body)
}

/// Generic transport error for an unexpected status
pub(crate) fn transport_error(status: u16, body: ApiErrorBody) -> SessionError {
    let message = body
        .message
        .unwrap_or_else(|| "Request failed".to_string());
    SessionError::Transport(AppError::from_status(status, message))
}

/// Auth backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    transport: Arc<HttpTransport>,
}

impl HttpAuthApi {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

impl AuthApi for HttpAuthApi {
    async fn fetch_identity(&self) -> SessionResult<IdentityPayload> {
        let response = self.transport.get(ME_PATH).await?;
        if response.status().is_success() {
            return Ok(response.json().await.map_err(AppError::from)?);
        }

        let (status, body) = read_error(response).await;
        Err(match status {
            401 => SessionError::Unauthenticated,
            _ => transport_error(status, body),
        })
    }

    async fn login(&self, request: LoginRequest) -> SessionResult<LoginOutcome> {
        let response = self.transport.post_json(LOGIN_PATH, &request).await?;
        if response.status().is_success() {
            let reply: LoginReply = response.json().await.map_err(AppError::from)?;
            return match (reply.mfa_required, reply.mfa_token, reply.user) {
                (true, Some(mfa_token), _) => Ok(LoginOutcome::MfaRequired { mfa_token }),
                (_, _, Some(user)) => Ok(LoginOutcome::Authenticated(user)),
                _ => Err(SessionError::Internal(
                    "Login reply carried neither an identity nor a challenge".to_string(),
                )),
            };
        }

        let (status, body) = read_error(response).await;
        if body.code.as_deref() == Some(MFA_SETUP_REQUIRED_CODE) {
            return Err(SessionError::MfaSetupRequired);
        }
        Err(match status {
            401 => SessionError::InvalidCredentials,
            _ => transport_error(status, body),
        })
    }

    async fn refresh(&self) -> SessionResult<()> {
        let response = self.transport.post(REFRESH_PATH).await?;
        if response.status().is_success() {
            return Ok(());
        }

        let (status, body) = read_error(response).await;
        Err(match status {
            401 => SessionError::Unauthenticated,
            _ => transport_error(status, body),
        })
    }

    async fn logout(&self) -> SessionResult<()> {
        let response = self.transport.post(LOGOUT_PATH).await?;
        if response.status().is_success() || response.status().as_u16() == 401 {
            // Already-invalid sessions count as logged out
            return Ok(());
        }

        let (status, body) = read_error(response).await;
        Err(transport_error(status, body))
    }

    async fn verify_totp(&self, mfa_token: &str, code: &str) -> SessionResult<IdentityPayload> {
        let request = TotpVerifyRequest {
            mfa_token: mfa_token.to_string(),
            token: code.to_string(),
        };
        let response = self.transport.post_json(MFA_VERIFY_PATH, &request).await?;
        decode_verification(response).await
    }

    async fn redeem_backup_code(
        &self,
        mfa_token: &str,
        backup_code: &str,
    ) -> SessionResult<IdentityPayload> {
        let request = BackupCodeRequest {
            mfa_token: mfa_token.to_string(),
            backup_code: backup_code.to_string(),
        };
        let response = self.transport.post_json(MFA_BACKUP_PATH, &request).await?;
        decode_verification(response).await
    }
}

/// Shared response handling for both second-factor endpoints
async fn decode_verification(response: Response) -> SessionResult<IdentityPayload> {
    if response.status().is_success() {
        return Ok(response.json().await.map_err(AppError::from)?);
    }

    let (status, body) = read_error(response).await;
    Err(match status {
        // Wrong code, expired challenge token, or reused backup code
        400 | 401 => SessionError::InvalidSecondFactor,
        _ => transport_error(status, body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_paths_are_exempt_from_interception() {
        assert!(is_auth_path(ME_PATH));
        assert!(is_auth_path(LOGIN_PATH));
        assert!(is_auth_path(REFRESH_PATH));
        assert!(is_auth_path(LOGOUT_PATH));
        assert!(is_auth_path(MFA_VERIFY_PATH));
        assert!(is_auth_path(MFA_BACKUP_PATH));
    }

    #[test]
    fn test_data_paths_are_intercepted() {
        assert!(!is_auth_path("/tenants"));
        assert!(!is_auth_path("/users/42"));
        assert!(!is_auth_path("/authors"));
    }

    #[test]
    fn test_transport_error_prefers_backend_message() {
        let err = transport_error(
            503,
            ApiErrorBody {
                code: None,
                message: Some("Maintenance window".to_string()),
            },
        );
        match err {
            SessionError::Transport(e) => {
                assert_eq!(e.status_code(), 503);
                assert_eq!(e.message(), "Maintenance window");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
