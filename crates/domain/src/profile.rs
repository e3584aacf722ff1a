//! Authenticated user profile

use serde::{Deserialize, Serialize};

/// A role granted to the user, optionally scoped to a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    /// Role name (e.g. `GROUP_OWNER`).
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub role_name: String,
    /// Group the role applies to; empty for global roles.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub group_id: String,
}

/// Profile of the currently authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Roles held by the user.
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub roles: Vec<Role>,
}

impl UserProfile {
    /// Returns every group the user belongs to.
    ///
    /// Ids keep the order of the roles they come from. Empty ids and
    /// repeats are skipped.
    #[must_use]
    pub fn all_group_ids(&self) -> Vec<String> {
        let mut group_ids: Vec<String> = Vec::new();
        for role in &self.roles {
            if role.group_id.is_empty() || group_ids.contains(&role.group_id) {
                continue;
            }
            group_ids.push(role.group_id.clone());
        }
        group_ids
    }
}
