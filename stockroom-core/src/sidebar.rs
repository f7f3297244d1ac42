//! Sidebar visibility state
//!
//! One instance per client session, created open. Clones share the same flag
//! so the sidebar's dismiss control and the top bar control flip and read a
//! single value. [`SidebarRegistry`] keeps the instances of every client a
//! server is talking to.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SidebarState {
    open: Arc<AtomicBool>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    /// Create the state, open
    pub fn new() -> Self {
        Self {
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Flip the state. The only mutator.
    pub fn toggle(&self) {
        let was_open = self.open.fetch_xor(true, Ordering::AcqRel);
        debug!(open = !was_open, "sidebar toggled");
    }
}

/// Sidebar states keyed by client id.
///
/// Only closed sidebars are stored: a client without an entry is open, and an
/// entry is dropped as soon as it is toggled back open. At most `capacity`
/// clients can hold a closed sidebar at once.
#[derive(Debug, Clone)]
pub struct SidebarRegistry {
    clients: Arc<RwLock<HashMap<Uuid, SidebarState>>>,
    capacity: usize,
}

impl Default for SidebarRegistry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl SidebarRegistry {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(capacity: usize) -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// The client's sidebar. Unknown or missing clients get a fresh, open one
    /// that is not registered.
    pub fn state_for(&self, client: Option<Uuid>) -> SidebarState {
        let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);
        client
            .and_then(|id| clients.get(&id).cloned())
            .unwrap_or_default()
    }

    /// Toggle the client's sidebar and return whether it is now open
    pub fn toggle(&self, client: Uuid) -> bool {
        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);

        if !clients.contains_key(&client) && clients.len() >= self.capacity {
            warn!(capacity = self.capacity, "sidebar registry full, toggle ignored");
            return true;
        }

        let sidebar = clients.entry(client).or_default().clone();
        sidebar.toggle();

        let open = sidebar.is_open();
        if open {
            clients.remove(&client);
        }
        open
    }

    /// Number of clients with a closed sidebar
    pub fn len(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
