//! Session extraction
//!
//! The session lives in a signed cookie (or a bearer token). Reading it never
//! fails a request: a missing, expired or malformed session is simply no
//! user, and everything gated is denied.

pub mod handlers;
pub mod jwt;


use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use jwt::SessionKeys;
use stockroom_core::{SessionStore, User};
use tracing::debug;

/// Session store view over a single request
pub struct RequestSession<'a> {
    keys: &'a SessionKeys,
    /// Candidate tokens, most preferred first
    tokens: Vec<String>,
}

impl<'a> RequestSession<'a> {
    pub fn new(keys: &'a SessionKeys, tokens: Vec<String>) -> Self {
        Self { keys, tokens }
    }

    /// Collect the session cookie and the bearer header, in that order
    pub fn from_headers(keys: &'a SessionKeys, cookie_name: &str, headers: &HeaderMap) -> Self {
        let cookie = CookieJar::from_headers(headers)
            .get(cookie_name)
            .map(|cookie| cookie.value().to_string());

        Self::new(keys, cookie.into_iter().chain(bearer_token(headers)).collect())
    }
}

impl SessionStore for RequestSession<'_> {
    /// The first token that verifies wins; a stale cookie does not hide a
    /// valid bearer token.
    fn load(&self) -> Option<User> {
        self.tokens
            .iter()
            .find_map(|token| match self.keys.user_from_token(token) {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!(error = %e, "ignoring session token");
                    None
                }
            })
    }
}

/// Extract a bearer token from the authorization header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

/// The current user, if any. Never rejects.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let session = RequestSession::from_headers(
            &app_state.session_keys,
            &app_state.config.cookie_name,
            &parts.headers,
        );

        Ok(CurrentUser(session.load()))
    }
}
