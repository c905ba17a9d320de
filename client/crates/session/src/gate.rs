//! Auth Gate
//!
//! Decides what the protected area may render, as a pure function of
//! store state. The gate never issues network calls: the session is
//! validated once per load and trusted in memory afterwards, with
//! mid-session expiry handled by the interceptor.

use crate::store::SessionState;

/// Rendering decision for protected content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Initial check still in flight; render a loading indicator only
    Loading,
    /// Usable identity present; render protected content unchanged
    Allow,
    /// No usable identity; send the user to the login entry point
    RedirectToLogin,
}

/// Derive the gate decision from a state snapshot
pub fn decide(state: &SessionState) -> GateDecision {
    match state {
        SessionState::Validating => GateDecision::Loading,
        SessionState::Authenticated { .. } => GateDecision::Allow,
        SessionState::Anonymous | SessionState::MfaPending { .. } => GateDecision::RedirectToLogin,
    }
}
