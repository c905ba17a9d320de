//! Wire DTOs (Data Transfer Objects)
//!
//! JSON shapes exchanged with the auth backend. Field names follow the
//! backend's camelCase convention. Payloads are untrusted input;
//! validation into domain types happens in `domain::entity`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Identity
// ============================================================================

/// Identity record as returned by `/auth/me`, login, and MFA verification
///
/// `id` and `email` are required for a usable identity, but modeled as
/// `Option` so an incomplete payload deserializes and is rejected with
/// a diagnosable error instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub user_type: Option<String>,
    #[serde(default)]
    pub mfa_warning: Option<MfaWarningPayload>,
}

/// Advisory about an approaching MFA grace-period deadline
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaWarningPayload {
    pub message: String,
    pub grace_ends_at: DateTime<Utc>,
    pub days_remaining: i64,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// Wiped on drop; the password lives only as long as the request.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response: either a full identity or an MFA interrupt
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginReply {
    pub user: Option<IdentityPayload>,
    #[serde(default)]
    pub mfa_required: bool,
    pub mfa_token: Option<String>,
}

// ============================================================================
// MFA verification
// ============================================================================

/// TOTP verification request; wiped on drop
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct TotpVerifyRequest {
    pub mfa_token: String,
    pub token: String,
}

impl fmt::Debug for TotpVerifyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpVerifyRequest")
            .field("mfa_token", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Backup-code verification request; wiped on drop
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct BackupCodeRequest {
    pub mfa_token: String,
    pub backup_code: String,
}

impl fmt::Debug for BackupCodeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackupCodeRequest")
            .field("mfa_token", &"<redacted>")
            .field("backup_code", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error body shape; `code` distinguishes enforcement errors such as
/// `MFA_SETUP_REQUIRED` from generic failures
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Error code the backend sends when the organization mandates MFA but
/// the account has none configured
pub const MFA_SETUP_REQUIRED_CODE: &str = "MFA_SETUP_REQUIRED";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_payload_deserializes_camel_case() {
        let payload: IdentityPayload = serde_json::from_str(
            r#"{
                "id": "1",
                "email": "a@b.com",
                "name": "Ada",
                "role": "admin",
                "permissions": ["portal.view"],
                "userType": "platform"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.id.as_deref(), Some("1"));
        assert_eq!(payload.user_type.as_deref(), Some("platform"));
        assert_eq!(payload.permissions, vec!["portal.view"]);
        assert!(payload.mfa_warning.is_none());
    }

    #[test]
    fn test_identity_payload_tolerates_missing_fields() {
        let payload: IdentityPayload = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert!(payload.id.is_none());
        assert!(payload.permissions.is_empty());
    }

    #[test]
    fn test_login_reply_mfa_signal() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"mfaRequired": true, "mfaToken": "tok123"}"#).unwrap();
        assert!(reply.mfa_required);
        assert_eq!(reply.mfa_token.as_deref(), Some("tok123"));
        assert!(reply.user.is_none());
    }

    #[test]
    fn test_error_body_tolerates_unknown_shape() {
        let body: ApiErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.code.is_none());

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"code": "MFA_SETUP_REQUIRED"}"#).unwrap();
        assert_eq!(body.code.as_deref(), Some(MFA_SETUP_REQUIRED_CODE));
    }

    #[test]
    fn test_credential_requests_redact_secrets_in_debug() {
        let login = LoginRequest {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{login:?}").contains("hunter2"));

        let verify = TotpVerifyRequest {
            mfa_token: "chal-9".to_string(),
            token: "123456".to_string(),
        };
        let rendered = format!("{verify:?}");
        assert!(!rendered.contains("chal-9"));
        assert!(!rendered.contains("123456"));

        let backup = BackupCodeRequest {
            mfa_token: "chal-9".to_string(),
            backup_code: "AAAA-BBBB".to_string(),
        };
        assert!(!format!("{backup:?}").contains("AAAA-BBBB"));
    }

    #[test]
    fn test_login_request_zeroizes() {
        let mut request = LoginRequest {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };
        request.zeroize();
        assert!(request.password.is_empty());
        assert!(request.email.is_empty());
    }

    #[test]
    fn test_verify_requests_serialize_camel_case() {
        let json = serde_json::to_value(TotpVerifyRequest {
            mfa_token: "tok".into(),
            token: "000000".into(),
        })
        .unwrap();
        assert_eq!(json["mfaToken"], "tok");

        let json = serde_json::to_value(BackupCodeRequest {
            mfa_token: "tok".into(),
            backup_code: "abcd-efgh".into(),
        })
        .unwrap();
        assert_eq!(json["backupCode"], "abcd-efgh");
    }
}
