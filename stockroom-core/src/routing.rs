//! Route table
//!
//! Maps a location to exactly one page. Resolution never looks at the user:
//! a page hidden from someone's menu still resolves when its URL is entered
//! directly. Authorization of page data belongs to the backend.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Pages the dashboard can mount in its content region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    SkuList,
    SkuCreate,
    SkuDetail,
    Inventory,
    InventoryDetail,
    Reports,
    UserAdmin,
    Profile,
    Help,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::SkuList => "SKUs",
            Page::SkuCreate => "New SKU",
            Page::SkuDetail => "SKU",
            Page::Inventory => "Inventory",
            Page::InventoryDetail => "Inventory item",
            Page::Reports => "Reports",
            Page::UserAdmin => "Users",
            Page::Profile => "Profile",
            Page::Help => "Help",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A `(pattern, page)` pair. Segments starting with `:` capture a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    pub page: Page,
}

impl Route {
    pub const fn new(pattern: &'static str, page: Page) -> Self {
        Self { pattern, page }
    }

    fn param_count(&self) -> usize {
        self.pattern.matches(':').count()
    }
}

/// The dashboard's route table
pub const STANDARD_ROUTES: &[Route] = &[
    Route::new("/", Page::Dashboard),
    Route::new("/sku", Page::SkuList),
    Route::new("/sku/new", Page::SkuCreate),
    Route::new("/sku/:id", Page::SkuDetail),
    Route::new("/inventory", Page::Inventory),
    Route::new("/inventory/:id", Page::InventoryDetail),
    Route::new("/reports", Page::Reports),
    Route::new("/users", Page::UserAdmin),
    Route::new("/profile", Page::Profile),
    Route::new("/help", Page::Help),
];

/// Result of matching a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub page: Page,
    pub pattern: &'static str,
    /// Captured parameters, e.g. `{"id": "SKU-42"}`
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Static route table, ordered so that literal routes win over
/// parameterized ones
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    pub fn standard() -> Self {
        Self::new(STANDARD_ROUTES)
    }

    pub fn new(routes: &[Route]) -> Self {
        let mut routes = routes.to_vec();
        // Stable: declared order breaks ties.
        routes.sort_by_key(Route::param_count);
        Self { routes }
    }

    /// Resolve a location to a page, or `None` for not-found
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let path = normalize(location);

        let found = self.routes.iter().find_map(|route| {
            match_pattern(route.pattern, &path).map(|params| RouteMatch {
                page: route.page,
                pattern: route.pattern,
                params,
            })
        });

        if found.is_none() {
            debug!(path = %path, "no route matched");
        }
        found
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip query/fragment and trailing slashes; the root stays `/`
pub fn normalize(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Match a route pattern against a path, extracting parameters.
/// Path segments are percent-decoded after splitting, so `%2F` stays inside
/// its segment.
///
/// Pattern: "/sku/:id"
/// Path: "/sku/SKU-42"
/// Result: Some({"id": "SKU-42"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        // Segments are compared decoded; undecodable input matches nothing.
        let actual = urlencoding::decode(actual).ok()?;
        if let Some(name) = pat.strip_prefix(':') {
            if actual.is_empty() {
                return None;
            }
            params.insert(name.to_string(), actual.into_owned());
        } else if *pat != actual {
            return None;
        }
    }

    Some(params)
}
