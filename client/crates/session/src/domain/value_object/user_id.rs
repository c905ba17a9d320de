//! UserId Value Object
//!
//! Typed wrapper over the backend-issued user identifier. The backend
//! owns the ID shape; the client treats it as an opaque string.

use kernel::id::Id;

#[derive(Clone)]
pub struct UserMarker;
pub type UserId = Id<UserMarker>;
