//! Roles and permissions.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{PermissionId, RoleId};

/// A grantable permission from the backend's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    /// Stable machine name, e.g. `flights:write`.
    pub slug: String,
    /// Human-readable label shown in the role form.
    pub label: String,
    /// Area of the console the permission belongs to.
    pub module: String,
}

/// A role grouping a set of permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permission_ids: Vec<PermissionId>,
}

impl Role {
    /// Returns whether the role grants the given permission.
    pub fn grants(&self, permission: &PermissionId) -> bool {
        self.permission_ids.contains(permission)
    }
}

/// Write-side fields for creating or updating a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePayload {
    pub name: String,
    pub description: String,
    pub permission_ids: Vec<PermissionId>,
}

/// Slug of the agency role, which is managed through a dedicated flow and
/// never offered in the user form.
pub const AGENT_ROLE_SLUG: &str = "agent";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_grants_lookup() {
        let role = Role {
            id: RoleId::from("role-1"),
            name: "Operations".to_string(),
            description: String::new(),
            permission_ids: vec![PermissionId::from("p-1"), PermissionId::from("p-2")],
        };

        assert!(role.grants(&PermissionId::from("p-1")));
        assert!(!role.grants(&PermissionId::from("p-3")));
    }

    #[test]
    fn missing_permission_list_defaults_empty() {
        let role: Role =
            serde_json::from_str(r#"{"id":"role-9","name":"Viewer"}"#).unwrap();
        assert!(role.permission_ids.is_empty());
        assert!(role.description.is_empty());
    }
}
