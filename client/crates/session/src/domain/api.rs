//! Backend API Trait
//!
//! Interface to the auth backend. The HTTP implementation lives in the
//! infrastructure layer; tests substitute an in-memory stub.

use crate::dto::{IdentityPayload, LoginRequest};
use crate::error::SessionResult;

/// Outcome of a credential submission
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted, full identity returned
    Authenticated(IdentityPayload),
    /// Credentials accepted, second factor required
    MfaRequired {
        /// Opaque challenge token to present with the second factor
        mfa_token: String,
    },
}

/// Auth backend API
#[trait_variant::make(AuthApi: Send)]
pub trait LocalAuthApi {
    /// Validate the cookie session and fetch the current identity
    async fn fetch_identity(&self) -> SessionResult<IdentityPayload>;

    /// Submit credentials; exactly one attempt
    async fn login(&self, request: LoginRequest) -> SessionResult<LoginOutcome>;

    /// Renew the session credential (cookie rotated by the backend)
    async fn refresh(&self) -> SessionResult<()>;

    /// Invalidate the backend session
    async fn logout(&self) -> SessionResult<()>;

    /// Exchange a TOTP code for a full identity
    async fn verify_totp(&self, mfa_token: &str, code: &str) -> SessionResult<IdentityPayload>;

    /// Exchange an unused backup code for a full identity
    async fn redeem_backup_code(
        &self,
        mfa_token: &str,
        backup_code: &str,
    ) -> SessionResult<IdentityPayload>;
}
