//! Route definitions for the Stockroom web server
//!
//! Dashboard pages are not listed here: they come from the core route table
//! through the fallback handler.

use crate::{auth, handlers, AppState, WebConfig};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/menu", get(handlers::get_menu))
        .route("/sidebar", get(handlers::get_sidebar))
        .route("/sidebar/toggle", post(handlers::toggle_sidebar_json))
}

/// Sign-in, sign-out and sidebar form endpoints
pub fn control_routes() -> Router<AppState> {
    Router::new()
        .route(
            auth::handlers::LOGIN_PATH,
            get(auth::handlers::login_page).post(auth::handlers::login),
        )
        .route("/logout", post(auth::handlers::logout))
        .route("/sidebar/toggle", post(handlers::toggle_sidebar))
}

/// Static asset service
pub fn static_service(config: &WebConfig) -> ServeDir {
    let dir = config
        .static_dir
        .clone()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string());
    ServeDir::new(dir)
}
