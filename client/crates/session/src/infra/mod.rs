//! Infrastructure Layer
//!
//! HTTP implementations of the domain seams.

pub mod http;
pub mod interceptor;

pub use http::HttpAuthApi;
pub use interceptor::AuthorizedClient;
