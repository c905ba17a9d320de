//! Session - Portal Authentication Lifecycle
//!
//! Client-side session core for the admin portal:
//! - `domain/` - Identity, value objects, the backend API trait
//! - `application/` - Use cases (bootstrap, sign in, MFA verify, sign out)
//! - `infra/` - HTTP implementation and the refresh-and-retry interceptor
//! - `store` - Single source of truth for the session state machine
//! - `gate` - Render gate derived from store state
//!
//! ## Features
//! - Cookie-backed sessions: the credential is an HTTP-only cookie the
//!   transport carries automatically; no token ever touches client code
//! - One identity check per application load; in-memory state afterwards
//! - Transparent single refresh-and-retry on credential expiry
//! - TOTP / backup-code second-factor flow
//!
//! ## Security Model
//! - The credential is never readable, storable, or loggable here
//! - Identity payloads are validated before they become session state
//! - Passwords and second-factor codes are zeroized on drop

pub mod application;
pub mod domain;
pub mod dto;
pub mod error;
pub mod gate;
pub mod infra;
pub mod store;

// Re-exports for convenience
pub use application::config::{AccessPolicy, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use gate::GateDecision;
pub use infra::http::HttpAuthApi;
pub use infra::interceptor::AuthorizedClient;
pub use store::{SessionState, SessionStore};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::dto::*;
}

pub mod api {
    pub use crate::domain::api::*;
}
