//! Per-client sidebar identity
//!
//! Each browser gets its own sidebar state. The client is identified by a
//! random id in [`CLIENT_COOKIE`], minted the first time it toggles.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;
use uuid::Uuid;

/// Cookie carrying the client id
pub const CLIENT_COOKIE: &str = "stockroom_client";

/// The client id from the request, if it carries a valid one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarClient(pub Option<Uuid>);

impl SidebarClient {
    pub fn from_jar(jar: &CookieJar) -> Self {
        Self(
            jar.get(CLIENT_COOKIE)
                .and_then(|cookie| Uuid::parse_str(cookie.value()).ok()),
        )
    }

    /// The existing id, or a new one with the cookie that carries it
    pub fn ensure(self, jar: CookieJar) -> (Uuid, CookieJar) {
        match self.0 {
            Some(id) => (id, jar),
            None => {
                let id = Uuid::new_v4();
                debug!(client = %id, "new sidebar client");
                let cookie = Cookie::build((CLIENT_COOKIE, id.to_string()))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Strict);
                (id, jar.add(cookie))
            }
        }
    }
}

impl<S> FromRequestParts<S> for SidebarClient
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_jar(&CookieJar::from_headers(&parts.headers)))
    }
}
