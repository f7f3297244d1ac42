//! HTTP request handlers for the Stockroom web server

use crate::{
    auth::CurrentUser,
    sidebar::SidebarClient,
    templates::{LayoutTemplate, NotFoundTemplate, PageContent, PageTemplate},
    AppState, WebResult,
};
use askama::Template;
use axum_extra::extract::cookie::CookieJar;
use axum::{
    extract::State,
    http::{header::REFERER, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;
use stockroom_core::{compose, visible_entries, VisibleSection};
use tracing::debug;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: String,
}

/// Sidebar state response
#[derive(Debug, Serialize)]
pub struct SidebarResponse {
    pub open: bool,
}

/// Visible menu response
#[derive(Serialize)]
pub struct MenuResponse<'a> {
    pub authenticated: bool,
    pub sections: Vec<VisibleSection<'a>>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The menu as the current user sees it
pub async fn get_menu(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Response {
    let sections = visible_entries(&state.menu, user.as_ref());
    Json(MenuResponse {
        authenticated: user.is_some(),
        sections,
    })
    .into_response()
}

/// Current sidebar state of the requesting client
pub async fn get_sidebar(
    State(state): State<AppState>,
    SidebarClient(client): SidebarClient,
) -> Json<SidebarResponse> {
    Json(SidebarResponse {
        open: state.sidebar.state_for(client).is_open(),
    })
}

/// Toggle the client's sidebar and report the new state
pub async fn toggle_sidebar_json(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SidebarResponse>) {
    let (client, jar) = SidebarClient::from_jar(&jar).ensure(jar);
    let open = state.sidebar.toggle(client);
    (jar, Json(SidebarResponse { open }))
}

/// Toggle the client's sidebar from a form and go back to the page it was
/// posted from
pub async fn toggle_sidebar(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (CookieJar, Redirect) {
    let (client, jar) = SidebarClient::from_jar(&jar).ensure(jar);
    state.sidebar.toggle(client);
    (jar, Redirect::to(&return_path(&headers)))
}

/// Local path of the referring page, or `/`.
///
/// Only the path and query are kept, so the redirect never leaves the site.
fn return_path(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| referer.parse::<Uri>().ok())
        .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_string()))
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

/// Resolve the location through the route table and render it in the layout.
///
/// The route table does not look at the user: pages hidden from the menu
/// still render when addressed directly.
pub async fn render_route(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    SidebarClient(client): SidebarClient,
    method: Method,
    uri: Uri,
) -> WebResult<Response> {
    let location = uri.path();

    let (status, content) = match state.routes.resolve(location) {
        Some(found) if method == Method::GET || method == Method::HEAD => {
            debug!(page = ?found.page, location, "route resolved");
            let html = PageTemplate::new(&found).render()?;
            (
                StatusCode::OK,
                PageContent {
                    title: found.page.title().to_string(),
                    location: location.to_string(),
                    html,
                },
            )
        }
        Some(_) => return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response()),
        None => {
            let html = NotFoundTemplate::new(location).render()?;
            (
                StatusCode::NOT_FOUND,
                PageContent {
                    title: "Not found".to_string(),
                    location: location.to_string(),
                    html,
                },
            )
        }
    };

    let menu = visible_entries(&state.menu, user.as_ref());
    let layout = compose(state.sidebar.state_for(client).is_open(), menu, content);
    let html = LayoutTemplate::from_layout(&layout, user.as_ref(), state.config.dev_mode).render()?;

    Ok((status, Html(html)).into_response())
}
