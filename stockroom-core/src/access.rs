//! Access predicate
//!
//! The single definition of the authorization rule. The menu filter and any
//! route guard call [`satisfies`]; nothing else evaluates permissions.

use crate::types::User;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Permission and/or role condition attached to a menu entry or capability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    /// Permission the user must hold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    /// Roles allowed; the user's role must be one of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<String>>,
}

impl AccessRequirement {
    /// Requirement on a single permission
    pub fn permission(permission: impl Into<String>) -> Self {
        Self {
            permission: Some(permission.into()),
            roles: None,
        }
    }

    /// Requirement on membership in a set of roles
    pub fn roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            permission: None,
            roles: Some(roles.into_iter().map(Into::into).collect()),
        }
    }

    /// Add a role clause to an existing requirement
    pub fn and_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    fn permission_clause(&self, user: &User) -> bool {
        match &self.permission {
            Some(permission) => user.holds(permission),
            None => true,
        }
    }

    fn role_clause(&self, user: &User) -> bool {
        match &self.roles {
            Some(roles) => roles.contains(user.role.as_str()),
            None => true,
        }
    }
}

/// Decide whether `user` meets `requirement`.
///
/// - no user: always `false`, even for an absent requirement
/// - no requirement: `true` for any present user
/// - bypass role: `true`
/// - otherwise both the permission and the role clause must hold
///
/// Unknown permission or role strings never match anything, so a typo in a
/// requirement denies rather than grants.
pub fn satisfies(user: Option<&User>, requirement: Option<&AccessRequirement>) -> bool {
    let Some(user) = user else {
        return false;
    };

    let Some(requirement) = requirement else {
        return true;
    };

    if user.role.is_bypass() {
        return true;
    }

    requirement.permission_clause(user) && requirement.role_clause(user)
}

impl User {
    /// Shorthand for [`satisfies`] with a present user
    pub fn satisfies(&self, requirement: Option<&AccessRequirement>) -> bool {
        satisfies(Some(self), requirement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn member(permissions: &[&str]) -> User {
        User::new("member-1", Role::Member, permissions.iter().copied())
    }

    fn sample_requirements() -> Vec<Option<AccessRequirement>> {
        vec![
            None,
            Some(AccessRequirement::default()),
            Some(AccessRequirement::permission("inventory.view")),
            Some(AccessRequirement::roles(["admin"])),
            Some(AccessRequirement::roles(Vec::<String>::new())),
            Some(AccessRequirement::permission("reports.view").and_roles(["admin", "member"])),
            Some(AccessRequirement::permission("no.such.permission")),
            Some(AccessRequirement::roles(["no_such_role"])),
        ]
    }

    #[test]
    fn bypass_role_satisfies_everything() {
        let root = User::new("root", Role::SuperAdmin, Vec::<String>::new());
        for requirement in sample_requirements() {
            assert!(satisfies(Some(&root), requirement.as_ref()));
        }
    }

    #[test]
    fn absent_user_satisfies_nothing() {
        for requirement in sample_requirements() {
            assert!(!satisfies(None, requirement.as_ref()));
        }
    }

    #[test]
    fn absent_requirement_admits_any_user() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Member] {
            let user = User::new("u", role, Vec::<String>::new());
            assert!(satisfies(Some(&user), None));
        }
    }

    #[test]
    fn permission_clause() {
        let requirement = AccessRequirement::permission("inventory.view");
        assert!(!member(&[]).satisfies(Some(&requirement)));
        assert!(member(&["inventory.view"]).satisfies(Some(&requirement)));
        assert!(!member(&["inventory.edit"]).satisfies(Some(&requirement)));
    }

    #[test]
    fn role_clause() {
        let requirement = AccessRequirement::roles(["admin"]);
        let admin = User::new("a", Role::Admin, Vec::<String>::new());
        assert!(admin.satisfies(Some(&requirement)));
        assert!(!member(&[]).satisfies(Some(&requirement)));
    }

    #[test]
    fn both_clauses_must_hold() {
        let requirement = AccessRequirement::permission("reports.view").and_roles(["admin"]);
        let admin_without = User::new("a", Role::Admin, Vec::<String>::new());
        let admin_with = User::new("a", Role::Admin, ["reports.view"]);
        assert!(!admin_without.satisfies(Some(&requirement)));
        assert!(admin_with.satisfies(Some(&requirement)));
        assert!(!member(&["reports.view"]).satisfies(Some(&requirement)));
    }

    #[test]
    fn unknown_strings_fail_closed() {
        let admin = User::new("a", Role::Admin, ["inventory.view"]);
        assert!(!admin.satisfies(Some(&AccessRequirement::permission("inventory.veiw"))));
        assert!(!admin.satisfies(Some(&AccessRequirement::roles(["Admin"]))));
    }

    #[test]
    fn empty_requirement_is_open() {
        assert!(member(&[]).satisfies(Some(&AccessRequirement::default())));
    }
}
