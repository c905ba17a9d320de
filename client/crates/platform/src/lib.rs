//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the shared technical foundation for talking
//! to the portal backend:
//! - HTTP transport (cookie-jar credential handling, TLS, timeouts)
//! - Transport configuration
//!
//! ## Security Model
//! The session credential is an HTTP-only cookie managed entirely by
//! the transport's cookie jar. No API in this crate exposes the cookie
//! value to calling code.

pub mod config;
pub mod http;
