//! Application Layer
//!
//! Use cases and application configuration.

pub mod bootstrap;
pub mod config;
pub mod mfa_verify;
pub mod sign_in;
pub mod sign_out;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use bootstrap::BootstrapUseCase;
pub use config::{AccessPolicy, SessionConfig};
pub use mfa_verify::{MfaVerifyUseCase, SecondFactor};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
