//! Layout composer
//!
//! Joins the sidebar state, the filtered menu and the routed page into one
//! screen description. It never decides what the menu contains, and the
//! chrome it describes does not depend on which page is mounted.

use crate::menu::{MenuEntry, VisibleSection};
use crate::routing::normalize;

/// One composed screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'a, C> {
    pub sidebar_open: bool,
    pub menu: Vec<VisibleSection<'a>>,
    pub content: C,
}

/// Compose a screen from its three inputs
pub fn compose<'a, C>(is_open: bool, menu: Vec<VisibleSection<'a>>, content: C) -> Layout<'a, C> {
    Layout {
        sidebar_open: is_open,
        menu,
        content,
    }
}

impl<'a, C> Layout<'a, C> {
    /// The navigation panel, present only while the sidebar is open
    pub fn panel(&self) -> Option<&[VisibleSection<'a>]> {
        if self.sidebar_open {
            Some(&self.menu)
        } else {
            None
        }
    }

    /// Number of entries the panel would show when open
    pub fn entry_count(&self) -> usize {
        self.menu.iter().map(|section| section.entries.len()).sum()
    }

    /// Swap the page content, keeping the chrome
    pub fn map_content<D>(self, f: impl FnOnce(C) -> D) -> Layout<'a, D> {
        Layout {
            sidebar_open: self.sidebar_open,
            menu: self.menu,
            content: f(self.content),
        }
    }
}

/// Whether `entry` should be highlighted for `location`.
///
/// `/sku` is active on `/sku` and `/sku/42`; the root entry only on `/`.
pub fn is_active(entry: &MenuEntry, location: &str) -> bool {
    let Some(path) = entry.path.as_deref() else {
        return false;
    };
    let path = normalize(path);
    let location = normalize(location);

    if path == "/" {
        return location == "/";
    }

    location == path
        || location
            .strip_prefix(path.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}
