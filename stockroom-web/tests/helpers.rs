//! Shared helpers for the HTTP-level tests
//!
//! Requests go straight into the router with `oneshot`; no socket is bound.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use http_body_util::BodyExt;
use std::sync::LazyLock;
use stockroom_core::{Role, User};
use stockroom_web::{create_app, sidebar::CLIENT_COOKIE, AppState, WebConfig};
use tower::ServiceExt;

// Initialize tracing once per test binary
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub const TEST_SECRET: &str = "integration-test-secret";

/// A router plus the state behind it
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

/// Collected response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    /// `data-entry` ids of the rendered menu links, in document order
    pub fn menu_links(&self) -> Vec<String> {
        self.body
            .split("data-entry=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    }

    /// `name=value` of the sidebar client cookie set by this response
    pub fn client_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(CLIENT_COOKIE))
            .map(str::to_string)
    }

    pub fn has_sidebar(&self) -> bool {
        self.body.contains("id=\"sidebar\"")
    }
}

pub fn test_config() -> WebConfig {
    WebConfig {
        session_secret: TEST_SECRET.to_string(),
        ..WebConfig::default()
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_config(test_config())
}

pub fn spawn_app_with_config(config: WebConfig) -> TestApp {
    LazyLock::force(&TRACING);

    let state = AppState::new(config).expect("failed to build state");
    let router = create_app(state.clone());
    TestApp { state, router }
}

impl TestApp {
    /// Session token for `user`, signed with the app's secret
    pub fn token_for(&self, user: &User) -> String {
        self.state
            .session_keys
            .issue(user, Duration::hours(1))
            .expect("failed to issue token")
    }

    pub fn session_cookie(&self, token: &str) -> String {
        format!("{}={}", self.state.config.cookie_name, token)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET `path`, signed in as `user` when given
    pub async fn get(&self, path: &str, user: Option<&User>) -> TestResponse {
        self.get_as_client(path, user, None).await
    }

    /// GET `path` from the browser identified by `client_cookie`
    pub async fn get_as_client(
        &self,
        path: &str,
        user: Option<&User>,
        client_cookie: Option<&str>,
    ) -> TestResponse {
        let mut cookies: Vec<String> = client_cookie.map(str::to_string).into_iter().collect();
        if let Some(user) = user {
            cookies.push(self.session_cookie(&self.token_for(user)));
        }

        let mut request = Request::builder().method(Method::GET).uri(path);
        if !cookies.is_empty() {
            request = request.header(header::COOKIE, cookies.join("; "));
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    /// POST an urlencoded form
    pub async fn post_form(&self, path: &str, form: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(request.body(Body::from(form.to_string())).unwrap())
            .await
    }
}

pub fn super_admin() -> User {
    User::new("root", Role::SuperAdmin, Vec::<String>::new()).with_display_name("Root")
}

pub fn admin() -> User {
    User::new("adm", Role::Admin, ["sku.view", "inventory.view"])
}

pub fn member(permissions: &[&str]) -> User {
    User::new("mem", Role::Member, permissions.iter().copied())
}
