//! Application state shared by every handler

use crate::{auth::jwt::SessionKeys, WebConfig, WebResult};
use std::sync::Arc;
use stockroom_core::{MenuModel, RouteTable, SidebarRegistry};
use tracing::{info, warn};

/// Application state. Cloning is cheap and shares everything, including the
/// per-client sidebar registry.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<WebConfig>,
    /// Menu model, declared once at startup
    pub menu: Arc<MenuModel>,
    /// Static route table
    pub routes: Arc<RouteTable>,
    /// Sidebar visibility, one state per client
    pub sidebar: SidebarRegistry,
    /// Session token verification keys
    pub session_keys: SessionKeys,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let menu = match &config.menu_file {
            Some(path) => MenuModel::from_file(path)?,
            None => MenuModel::standard(),
        };

        Ok(Self::with_menu(config, menu))
    }

    /// Create state around an already validated menu model
    pub fn with_menu(config: WebConfig, menu: MenuModel) -> Self {
        if config.uses_default_secret() {
            warn!("Using the default session secret; set STOCKROOM_SESSION_SECRET");
        }

        let session_keys = SessionKeys::new(config.session_secret.as_bytes());
        let routes = RouteTable::standard();
        let sidebar = SidebarRegistry::new(config.sidebar_clients);

        info!(
            sections = menu.sections.len(),
            routes = routes.len(),
            "Application state initialized"
        );

        Self {
            config: Arc::new(config),
            menu: Arc::new(menu),
            routes: Arc::new(routes),
            sidebar,
            session_keys,
        }
    }
}
