//! Entities

pub mod identity;
pub mod mfa_challenge;

// Re-exports
pub use identity::Identity;
pub use mfa_challenge::MfaChallenge;
