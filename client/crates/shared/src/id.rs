//! Common ID Types
//!
//! Type-safe wrappers for opaque, backend-issued identifiers.
//! The backend owns ID generation; the client only carries the
//! value around and must never synthesize one.

use std::fmt;
use std::marker::PhantomData;

use crate::error::app_error::{AppError, AppResult};

/// Generic typed ID wrapper around an opaque string
///
/// Usage:
/// ```
/// use kernel::id::Id;
/// struct UserMarker;
/// type UserId = Id<UserMarker>;
///
/// let id: UserId = Id::parse("usr_42").unwrap();
/// assert_eq!(id.as_str(), "usr_42");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Parse a backend-issued identifier
    ///
    /// Rejects empty and whitespace-only values. Anything else is
    /// accepted as-is; the backend is the authority on ID shape.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::bad_request("Identifier cannot be empty"));
        }
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume and return the underlying string
    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
