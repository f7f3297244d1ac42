//! Core trait definitions

use crate::types::User;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Read side of the session store.
///
/// Implementations must fail closed: anything missing, expired or malformed
/// is reported as `None`, never as an error.
pub trait SessionStore {
    fn load(&self) -> Option<User>;
}

impl SessionStore for Option<User> {
    fn load(&self) -> Option<User> {
        self.clone()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn load(&self) -> Option<User> {
        (**self).load()
    }
}

/// Parse a JSON-serialized user, treating any failure as no session
pub fn user_from_json(raw: &str) -> Option<User> {
    match serde_json::from_str::<User>(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            debug!(error = %e, "discarding unparseable session");
            None
        }
    }
}

/// In-process session store holding raw serialized session data, for tools
/// and tests that stand in for the browser
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    raw: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw session data as it would arrive from storage
    pub fn put_raw(&self, raw: impl Into<String>) {
        if let Ok(mut slot) = self.raw.write() {
            *slot = Some(raw.into());
        }
    }

    pub fn put(&self, user: &User) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.put_raw(raw);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.raw.write() {
            *slot = None;
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<User> {
        let slot = self.raw.read().ok()?;
        slot.as_deref().and_then(user_from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load().is_none());

        let user = User::new("u1", Role::Admin, ["inventory.view"]);
        store.put(&user);
        assert_eq!(store.load(), Some(user));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn malformed_session_is_absent() {
        let store = MemorySessionStore::new();
        store.put_raw("{not json");
        assert!(store.load().is_none());

        store.put_raw(r#"{"id":"u1","role":"wizard","permissions":[]}"#);
        assert!(store.load().is_none());
    }

    #[test]
    fn option_is_a_store() {
        let none: Option<User> = None;
        assert!(none.load().is_none());
        let some = Some(User::new("u", Role::Member, Vec::<String>::new()));
        assert_eq!((&some).load(), some);
    }
}
