//! MFA Challenge Entity
//!
//! Transient state for a login that passed password verification but
//! awaits a second factor. Carries only the opaque challenge token;
//! no identity is attached until verification succeeds.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// Pending second-factor challenge
#[derive(Clone)]
pub struct MfaChallenge {
    /// Opaque, short-lived token issued by the backend
    token: Zeroizing<String>,
    /// When the challenge was received (informational)
    issued_at: DateTime<Utc>,
}

impl MfaChallenge {
    pub fn new(token: String) -> Self {
        Self {
            token: Zeroizing::new(token),
            issued_at: Utc::now(),
        }
    }

    /// The challenge token, for submission back to the backend
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

// The token must never land in logs
impl std::fmt::Debug for MfaChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MfaChallenge")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
