//! Identity Entity
//!
//! The set of claims the backend returns for an authenticated user.
//! Built only from a validated payload; an `Identity` in hand means
//! `id` and `email` were present and well-formed.

use crate::domain::value_object::{Email, PermissionSet, UserId, UserType};
use crate::dto::IdentityPayload;
use crate::error::{SessionError, SessionResult};

/// Validated identity record
#[derive(Debug, Clone)]
pub struct Identity {
    /// Backend-issued user identifier
    pub id: UserId,
    /// Validated email address
    pub email: Email,
    /// Display name
    pub name: String,
    /// Role label (display only; authorization uses permissions)
    pub role: String,
    /// Capability set
    pub permissions: PermissionSet,
    /// Platform operator or tenant user
    pub user_type: UserType,
}

impl Identity {
    /// Validate a wire payload into an identity
    ///
    /// An identity missing `id`, `email`, or a recognizable user type
    /// is rejected; the session must then present as unauthenticated
    /// rather than trusting a partial record.
    pub fn from_payload(payload: IdentityPayload) -> SessionResult<Self> {
        let id = payload
            .id
            .ok_or_else(|| SessionError::InvalidIdentity("missing id".to_string()))?;
        let id = UserId::parse(id)
            .map_err(|_| SessionError::InvalidIdentity("empty id".to_string()))?;

        let email = payload
            .email
            .ok_or_else(|| SessionError::InvalidIdentity("missing email".to_string()))?;
        let email = Email::new(email)
            .map_err(|e| SessionError::InvalidIdentity(format!("bad email: {e}")))?;

        let user_type = payload
            .user_type
            .ok_or_else(|| SessionError::InvalidIdentity("missing user type".to_string()))?;
        let user_type = UserType::from_code(&user_type)
            .map_err(|e| SessionError::InvalidIdentity(e.to_string()))?;

        Ok(Self {
            id,
            email,
            name: payload.name.unwrap_or_default(),
            role: payload.role.unwrap_or_default(),
            permissions: PermissionSet::from(payload.permissions),
            user_type,
        })
    }
}
