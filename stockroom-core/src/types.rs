//! Core data type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The closed set of dashboard roles
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Satisfies every access requirement
    SuperAdmin,
    Admin,
    Member,
}

impl Role {
    /// The role that bypasses every permission and role clause
    pub const BYPASS: Role = Role::SuperAdmin;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    pub fn is_bypass(&self) -> bool {
        *self == Role::BYPASS
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Authenticated user as read from the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Subject identifier
    pub id: String,
    /// Display name
    pub display_name: Option<String>,
    /// Exactly one role
    pub role: Role,
    /// Granted permission identifiers
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl User {
    pub fn new<I, P>(id: impl Into<String>, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            id: id.into(),
            display_name: None,
            role,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Whether the permission was granted explicitly (ignores the bypass role)
    pub fn holds(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Name to show in the layout header
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Member] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn duplicate_permissions_collapse() {
        let user = User::new("u1", Role::Member, ["inventory.view", "inventory.view"]);
        assert_eq!(user.permissions.len(), 1);
        assert!(user.holds("inventory.view"));
    }

    #[test]
    fn unknown_role_fails_to_deserialize() {
        let json = r#"{"id":"u1","display_name":null,"role":"owner","permissions":[]}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn label_prefers_display_name() {
        let user = User::new("u1", Role::Member, Vec::<String>::new());
        assert_eq!(user.label(), "u1");
        assert_eq!(user.with_display_name("Dana").label(), "Dana");
    }
}
