//! UserType Value Object
//!
//! Discriminates platform operators from tenant users. The admin
//! portal only admits `platform` identities; the tenant web app only
//! admits `tenant` identities.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Platform,
    Tenant,
}

impl UserType {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserType::*;
        match self {
            Platform => "platform",
            Tenant => "tenant",
        }
    }

    /// Parse a backend-supplied discriminator
    ///
    /// Unknown values are an error, not a panic: the payload is
    /// untrusted network input.
    #[inline]
    pub fn from_code(code: &str) -> AppResult<Self> {
        use UserType::*;
        match code {
            "platform" => Ok(Platform),
            "tenant" => Ok(Tenant),
            other => Err(AppError::unprocessable(format!(
                "Unknown user type: {other}"
            ))),
        }
    }

    #[inline]
    pub const fn is_platform(&self) -> bool {
        matches!(self, UserType::Platform)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
