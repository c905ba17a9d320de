//! Value Objects

pub mod email;
pub mod permission;
pub mod user_id;
pub mod user_type;

// Re-exports
pub use email::Email;
pub use permission::{PORTAL_VIEW, PermissionSet};
pub use user_id::UserId;
pub use user_type::UserType;
