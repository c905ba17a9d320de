//! Permission Set Value Object
//!
//! The set of capability strings attached to an identity. Permissions
//! are opaque dotted names owned by the backend; the client only tests
//! membership.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability required to enter the admin portal
pub const PORTAL_VIEW: &str = "portal.view";

/// Set of permission strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(permissions: Vec<String>) -> Self {
        permissions.into_iter().collect()
    }
}
