//! Menu model and menu filter

use crate::access::{satisfies, AccessRequirement};
use crate::types::User;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Permission needed to see the SKU catalog entry
pub const SKU_VIEW: &str = "sku.view";
/// Permission needed to see the inventory entry
pub const INVENTORY_VIEW: &str = "inventory.view";
/// Permission needed to see the reports entry
pub const REPORTS_VIEW: &str = "reports.view";

/// A navigable entry in the menu model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Unique among siblings
    pub id: String,
    pub label: String,
    /// Destination route; entries without one are never rendered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Absent means visible to any authenticated user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<AccessRequirement>,
}

impl MenuEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: Some(path.into()),
            requirement: None,
        }
    }

    /// Entry that only groups and never navigates
    pub fn group(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: None,
            requirement: None,
        }
    }

    pub fn requires(mut self, requirement: AccessRequirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    /// Whether this entry is rendered for `user`
    pub fn is_visible_to(&self, user: Option<&User>) -> bool {
        self.path.is_some() && satisfies(user, self.requirement.as_ref())
    }
}

/// Top-level grouping of menu entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub entries: Vec<MenuEntry>,
}

impl MenuSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, entry: MenuEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// The declarative navigation tree, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuModel {
    #[serde(default)]
    pub sections: Vec<MenuSection>,
}

impl MenuModel {
    pub fn new(sections: Vec<MenuSection>) -> Self {
        Self { sections }
    }

    /// The dashboard's built-in menu
    pub fn standard() -> Self {
        Self::new(vec![
            MenuSection::new("main", "Main").entry(MenuEntry::new("dashboard", "Dashboard", "/")),
            MenuSection::new("catalog", "Catalog")
                .entry(
                    MenuEntry::new("sku", "SKUs", "/sku")
                        .requires(AccessRequirement::permission(SKU_VIEW)),
                )
                .entry(
                    MenuEntry::new("inventory", "Inventory", "/inventory")
                        .requires(AccessRequirement::permission(INVENTORY_VIEW)),
                ),
            MenuSection::new("insights", "Insights").entry(
                MenuEntry::new("reports", "Reports", "/reports")
                    .requires(AccessRequirement::permission(REPORTS_VIEW)),
            ),
            MenuSection::new("admin", "Administration").entry(
                MenuEntry::new("users", "Users", "/users")
                    .requires(AccessRequirement::roles(["admin"])),
            ),
            MenuSection::new("account", "Account")
                .entry(MenuEntry::new("profile", "Profile", "/profile"))
                .entry(MenuEntry::new("help", "Help", "/help")),
        ])
    }

    /// Iterate over every entry that carries a path
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .filter_map(|entry| entry.path.as_deref())
    }
}

/// A section that survived filtering, borrowing from the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleSection<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub entries: Vec<&'a MenuEntry>,
}

impl VisibleSection<'_> {
    /// Whether any entry in the section points at `path`
    pub fn contains_path(&self, path: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.path.as_deref() == Some(path))
    }
}

/// Compute the menu `user` may see.
///
/// Keeps the declared order of sections and entries, and drops sections that
/// end up empty. Recomputed on every call; nothing is cached across users.
pub fn visible_entries<'a>(menu: &'a MenuModel, user: Option<&User>) -> Vec<VisibleSection<'a>> {
    let visible: Vec<VisibleSection<'a>> = menu
        .sections
        .iter()
        .filter_map(|section| {
            let entries: Vec<&MenuEntry> = section
                .entries
                .iter()
                .filter(|entry| entry.is_visible_to(user))
                .collect();

            if entries.is_empty() {
                None
            } else {
                Some(VisibleSection {
                    id: &section.id,
                    label: &section.label,
                    entries,
                })
            }
        })
        .collect();

    trace!(
        user = ?user.map(|u| &u.id),
        sections = visible.len(),
        "filtered menu"
    );

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn ids<'a>(sections: &[VisibleSection<'a>]) -> Vec<(&'a str, Vec<&'a str>)> {
        sections
            .iter()
            .map(|s| (s.id, s.entries.iter().copied().map(|e| e.id.as_str()).collect()))
            .collect()
    }

    #[test]
    fn member_without_permissions_sees_open_entries_only() {
        let menu = MenuModel::standard();
        let user = User::new("m", Role::Member, Vec::<String>::new());
        let visible = visible_entries(&menu, Some(&user));

        assert_eq!(
            ids(&visible),
            vec![
                ("main", vec!["dashboard"]),
                ("account", vec!["profile", "help"]),
            ]
        );
    }

    #[test]
    fn admin_sees_user_admin_section() {
        let menu = MenuModel::standard();
        let admin = User::new("a", Role::Admin, [INVENTORY_VIEW]);
        let visible = visible_entries(&menu, Some(&admin));

        assert_eq!(
            ids(&visible),
            vec![
                ("main", vec!["dashboard"]),
                ("catalog", vec!["inventory"]),
                ("admin", vec!["users"]),
                ("account", vec!["profile", "help"]),
            ]
        );
    }

    #[test]
    fn super_admin_sees_everything_in_order() {
        let menu = MenuModel::standard();
        let root = User::new("r", Role::SuperAdmin, Vec::<String>::new());
        let visible = visible_entries(&menu, Some(&root));

        let all: Vec<&str> = visible
            .iter()
            .flat_map(|s| s.entries.iter().map(|e| e.id.as_str()))
            .collect();
        assert_eq!(
            all,
            vec!["dashboard", "sku", "inventory", "reports", "users", "profile", "help"]
        );
    }

    #[test]
    fn entries_without_path_are_never_rendered() {
        let menu = MenuModel::new(vec![MenuSection::new("s", "S")
            .entry(MenuEntry::group("grouping", "Grouping"))
            .entry(MenuEntry::new("leaf", "Leaf", "/leaf"))]);
        let root = User::new("r", Role::SuperAdmin, Vec::<String>::new());

        let visible = visible_entries(&menu, Some(&root));
        assert_eq!(ids(&visible), vec![("s", vec!["leaf"])]);
    }

    #[test]
    fn section_of_only_groups_is_omitted() {
        let menu = MenuModel::new(vec![
            MenuSection::new("empty", "Empty").entry(MenuEntry::group("g", "G")),
            MenuSection::new("none", "None"),
        ]);
        let root = User::new("r", Role::SuperAdmin, Vec::<String>::new());
        assert!(visible_entries(&menu, Some(&root)).is_empty());
    }

    #[test]
    fn absent_user_sees_nothing() {
        assert!(visible_entries(&MenuModel::standard(), None).is_empty());
    }

    #[test]
    fn contains_path_matches_entry_paths() {
        let menu = MenuModel::standard();
        let root = User::new("r", Role::SuperAdmin, Vec::<String>::new());
        let visible = visible_entries(&menu, Some(&root));
        let catalog = visible.iter().find(|s| s.id == "catalog").unwrap();
        assert!(catalog.contains_path("/sku"));
        assert!(!catalog.contains_path("/reports"));
    }
}
