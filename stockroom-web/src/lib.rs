//! Stockroom Web Server
//!
//! Hosts the navigation core: reads the session, filters the menu, renders
//! the sidebar layout around the routed page.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod sidebar;
pub mod state;
pub mod templates;

// Re-export main types
pub use server::StockroomServer;
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};
use askama::Template;
use stockroom_core::{LoggingConfig, SidebarRegistry, StockroomError};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Secret used when none is configured; fine for local development only
pub const DEFAULT_SESSION_SECRET: &str = "stockroom-dev-secret-change-me";

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // JSON routes
        .nest("/api", routes::api_routes())
        // Session and sidebar controls
        .merge(routes::control_routes())
        // Static assets
        .nest_service("/static", routes::static_service(&state.config))
        // Everything else goes through the route table
        .fallback(handlers::render_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode
    pub dev_mode: bool,
    /// Static files directory
    pub static_dir: Option<String>,
    /// Shared secret the session tokens are signed with
    pub session_secret: String,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Lifetime of tokens minted by `issue-session`
    pub session_ttl_hours: i64,
    /// TOML menu model replacing the built-in one
    pub menu_file: Option<String>,
    /// Most clients that can hold a closed sidebar at once
    pub sidebar_clients: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
            static_dir: None,
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            cookie_name: "stockroom_session".to_string(),
            session_ttl_hours: 8,
            menu_file: None,
            sidebar_clients: SidebarRegistry::DEFAULT_CAPACITY,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("STOCKROOM_HOST").unwrap_or(defaults.host),
            port: std::env::var("STOCKROOM_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            dev_mode: std::env::var("STOCKROOM_DEV_MODE")
                .ok()
                .and_then(|dev| dev.parse().ok())
                .unwrap_or(defaults.dev_mode),
            static_dir: std::env::var("STOCKROOM_STATIC_DIR").ok(),
            session_secret: std::env::var("STOCKROOM_SESSION_SECRET")
                .unwrap_or(defaults.session_secret),
            cookie_name: std::env::var("STOCKROOM_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            session_ttl_hours: std::env::var("STOCKROOM_SESSION_TTL_HOURS")
                .ok()
                .and_then(|ttl| ttl.parse().ok())
                .unwrap_or(defaults.session_ttl_hours),
            menu_file: std::env::var("STOCKROOM_MENU_FILE").ok(),
            sidebar_clients: std::env::var("STOCKROOM_SIDEBAR_CLIENTS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.sidebar_clients),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] StockroomError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::Core(core) => core.log(),
            other => error!(error = %other, "request failed"),
        }

        let page = templates::ErrorTemplate::new(500, "Something went wrong".to_string());
        match page.render() {
            Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
        }
    }
}

/// Load `.env` if there is one. A missing file is fine, a malformed one is
/// an error.
pub fn load_dotenv() -> WebResult<()> {
    env_file_result(dotenvy::dotenv().map(|_| ()))
}

fn env_file_result(result: Result<(), dotenvy::Error>) -> WebResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(WebError::Config(format!("failed to read .env: {}", e))),
    }
}

/// Initialize logging for the web server
pub fn init_logging(level: &str) {
    if let Err(e) = stockroom_core::init_logging(&LoggingConfig::with_level(level)) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_env_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let result = dotenvy::from_path(dir.path().join(".env"));
        assert!(env_file_result(result).is_ok());
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not an env file").unwrap();

        let result = dotenvy::from_path(file.path());
        assert!(matches!(env_file_result(result), Err(WebError::Config(_))));
    }
}
