//! Application Configuration
//!
//! Configuration for the session application layer.

use crate::domain::entity::Identity;
use crate::domain::value_object::{PORTAL_VIEW, UserType};

/// Access predicate an identity must satisfy to count as authenticated
/// for a given application
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Required user-type discriminator
    pub required_user_type: UserType,
    /// Required capability, if any
    pub required_permission: Option<String>,
}

impl AccessPolicy {
    /// Whether this identity may use the application
    pub fn admits(&self, identity: &Identity) -> bool {
        identity.user_type == self.required_user_type
            && self
                .required_permission
                .as_deref()
                .is_none_or(|p| identity.permissions.contains(p))
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            required_user_type: UserType::Platform,
            required_permission: Some(PORTAL_VIEW.to_string()),
        }
    }
}

/// Session application configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Access policy for this application
    pub access_policy: AccessPolicy,
}

impl SessionConfig {
    /// Config for the platform admin portal
    pub fn admin_portal() -> Self {
        Self::default()
    }

    /// Config for the tenant-facing web app: tenant identities, no
    /// extra capability required
    pub fn tenant_web() -> Self {
        Self {
            access_policy: AccessPolicy {
                required_user_type: UserType::Tenant,
                required_permission: None,
            },
        }
    }
}
