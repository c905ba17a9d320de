//! Session Error Types
//!
//! This module provides session-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Error)]
pub enum SessionError {
    /// Credentials rejected by the backend. Deliberately generic:
    /// no hint whether email or password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The organization mandates MFA but the account has none configured
    #[error("Multi-factor authentication is required but not set up")]
    MfaSetupRequired,

    /// Second factor rejected (wrong TOTP code or used backup code)
    #[error("Invalid verification code")]
    InvalidSecondFactor,

    /// A second-factor submission with no challenge in progress
    #[error("No second-factor challenge in progress")]
    NoPendingChallenge,

    /// No valid session credential
    #[error("Not authenticated")]
    Unauthenticated,

    /// Identity satisfies the backend but not this portal's access policy
    #[error("This account cannot access the portal")]
    AccessDenied,

    /// Backend returned an identity payload missing required fields
    #[error("Invalid identity payload: {0}")]
    InvalidIdentity(String),

    /// Transport-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidCredentials
            | SessionError::InvalidSecondFactor
            | SessionError::Unauthenticated => ErrorKind::Unauthorized,
            SessionError::AccessDenied => ErrorKind::Forbidden,
            SessionError::MfaSetupRequired | SessionError::InvalidIdentity(_) => {
                ErrorKind::UnprocessableEntity
            }
            SessionError::NoPendingChallenge => ErrorKind::Conflict,
            SessionError::Transport(e) => e.kind(),
            SessionError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            SessionError::MfaSetupRequired => {
                err.with_action("Contact your administrator to enable multi-factor authentication")
            }
            SessionError::Unauthenticated => err.with_action("Please sign in again"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SessionError::Transport(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Backend error");
            }
            SessionError::Internal(msg) => {
                tracing::error!(message = %msg, "Session internal error");
            }
            SessionError::InvalidIdentity(reason) => {
                tracing::warn!(reason = %reason, "Rejected identity payload");
            }
            SessionError::InvalidCredentials => {
                tracing::warn!("Sign-in attempt rejected");
            }
            SessionError::AccessDenied => {
                tracing::warn!("Identity failed the portal access policy");
            }
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SessionError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(SessionError::Unauthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(SessionError::InvalidSecondFactor.kind(), ErrorKind::Unauthorized);
        assert_eq!(SessionError::AccessDenied.kind(), ErrorKind::Forbidden);
        assert_eq!(
            SessionError::MfaSetupRequired.kind(),
            ErrorKind::UnprocessableEntity
        );
        assert_eq!(SessionError::NoPendingChallenge.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_transport_kind_passthrough() {
        let err = SessionError::Transport(AppError::service_unavailable("down"));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_mfa_setup_required_carries_action() {
        let app_err = SessionError::MfaSetupRequired.to_app_error();
        assert!(app_err.action().unwrap().contains("administrator"));
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let msg = SessionError::InvalidCredentials.to_string();
        assert!(!msg.to_lowercase().contains("email"));
        assert!(!msg.to_lowercase().contains("password"));
    }
}
