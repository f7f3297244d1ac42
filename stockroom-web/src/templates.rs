//! Templates for server-side rendering
//!
//! Page templates render the content region only; [`LayoutTemplate`] wraps
//! whatever page was routed in the same chrome.

use askama::Template;
use stockroom_core::{is_active, Layout, Page, RouteMatch, User, VisibleSection};

/// Sidebar link, flattened for the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub path: String,
    pub active: bool,
}

/// Sidebar section, flattened for the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    pub id: String,
    pub label: String,
    pub items: Vec<NavItem>,
}

impl NavSection {
    fn from_visible(section: &VisibleSection<'_>, location: &str) -> Self {
        Self {
            id: section.id.to_string(),
            label: section.label.to_string(),
            items: section
                .entries
                .iter()
                .filter_map(|entry| {
                    entry.path.as_ref().map(|path| NavItem {
                        id: entry.id.clone(),
                        label: entry.label.clone(),
                        path: path.clone(),
                        active: is_active(entry, location),
                    })
                })
                .collect(),
        }
    }
}

/// Rendered page body plus the location it was routed from
#[derive(Debug, Clone)]
pub struct PageContent {
    pub title: String,
    pub location: String,
    pub html: String,
}

/// The dashboard chrome around a page
#[derive(Template)]
#[template(path = "layout.html")]
pub struct LayoutTemplate {
    pub title: String,
    pub version: String,
    pub dev_mode: bool,
    pub sidebar_open: bool,
    pub sections: Vec<NavSection>,
    pub signed_in: bool,
    pub user_label: String,
    pub content: String,
}

impl LayoutTemplate {
    pub fn from_layout(layout: &Layout<'_, PageContent>, user: Option<&User>, dev_mode: bool) -> Self {
        let location = layout.content.location.as_str();
        let sections = layout
            .panel()
            .map(|panel| {
                panel
                    .iter()
                    .map(|section| NavSection::from_visible(section, location))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: format!("{} - Stockroom", layout.content.title),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dev_mode,
            sidebar_open: layout.sidebar_open,
            sections,
            signed_in: user.is_some(),
            user_label: user.map(|u| u.label().to_string()).unwrap_or_default(),
            content: layout.content.html.clone(),
        }
    }
}

/// Captured route parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub value: String,
}

/// Placeholder body for a routed page
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub page_id: String,
    pub title: String,
    pub summary: &'static str,
    pub params: Vec<Param>,
}

impl PageTemplate {
    pub fn new(found: &RouteMatch) -> Self {
        let mut params: Vec<Param> = found
            .params
            .iter()
            .map(|(name, value)| Param {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        params.sort_by(|a, b| a.name.cmp(&b.name));

        let title = match found.param("id") {
            Some(id) => format!("{} {}", found.page.title(), id),
            None => found.page.title().to_string(),
        };

        Self {
            page_id: serde_json::to_value(found.page)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            title,
            summary: summary(found.page),
            params,
        }
    }
}

fn summary(page: Page) -> &'static str {
    match page {
        Page::Dashboard => "Stock levels and recent activity at a glance.",
        Page::SkuList => "All stock keeping units in the catalog.",
        Page::SkuCreate => "Register a new stock keeping unit.",
        Page::SkuDetail => "Details of a single stock keeping unit.",
        Page::Inventory => "Quantities on hand per location.",
        Page::InventoryDetail => "Movements for a single inventory record.",
        Page::Reports => "Stock valuation and movement reports.",
        Page::UserAdmin => "Accounts and their roles.",
        Page::Profile => "Your account details.",
        Page::Help => "How to use the dashboard.",
    }
}

/// Body for locations no route matches
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub location: String,
}

impl NotFoundTemplate {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
        }
    }
}

/// Session sign-in screen
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub signed_in_as: String,
    pub error_message: String,
}

impl LoginTemplate {
    pub fn new(signed_in_as: Option<String>, error_message: Option<String>) -> Self {
        Self {
            title: "Sign in - Stockroom".to_string(),
            signed_in_as: signed_in_as.unwrap_or_default(),
            error_message: error_message.unwrap_or_default(),
        }
    }
}

/// Error page template
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub error_code: u16,
    pub error_message: String,
}

impl ErrorTemplate {
    pub fn new(error_code: u16, error_message: String) -> Self {
        Self {
            title: format!("Error {} - Stockroom", error_code),
            error_code,
            error_message,
        }
    }
}
