//! Sign-in and sign-out handlers
//!
//! Credentials are exchanged with the backend elsewhere; this side only
//! adopts the session token the backend hands out, and drops it on logout.

use super::CurrentUser;
use crate::{templates::LoginTemplate, AppState, WebResult};
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

/// Where logout sends the browser
pub const LOGIN_PATH: &str = "/login";

/// Session adoption form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// Render the sign-in screen
pub async fn login_page(CurrentUser(user): CurrentUser) -> WebResult<Html<String>> {
    let page = LoginTemplate::new(user.as_ref().map(|u| u.label().to_string()), None);
    Ok(Html(page.render()?))
}

/// Accept a backend-issued session token and store it in the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let token = form.token.trim();

    match state.session_keys.user_from_token(token) {
        Ok(user) => {
            info!(user = %user.id, role = %user.role, "session adopted");
            let cookie = Cookie::build((state.config.cookie_name.clone(), token.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        Err(e) => {
            warn!(error = %e, "rejected session token");
            let page = LoginTemplate::new(None, Some(e.to_string()));
            Ok((StatusCode::UNAUTHORIZED, Html(page.render()?)).into_response())
        }
    }
}

/// Clear the session and return to the sign-in screen
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(user) = &user {
        info!(user = %user.id, "logout");
    }

    let removal = Cookie::build((state.config.cookie_name.clone(), "")).path("/");
    (jar.remove(removal), Redirect::to(LOGIN_PATH))
}
