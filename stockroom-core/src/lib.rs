//! Stockroom Core - role/permission-gated navigation
//!
//! Decides which menu entries a user can see, keeps per-client sidebar state,
//! composes the screen layout and resolves routes. Everything here is
//! synchronous and free of HTTP concerns; `stockroom-web` hosts it.

pub mod access;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod menu;
pub mod routing;
pub mod sidebar;
pub mod traits;
pub mod types;

pub use access::{satisfies, AccessRequirement};
pub use error::*;
pub use layout::{compose, is_active, Layout};
pub use logging::*;
pub use menu::{visible_entries, MenuEntry, MenuModel, MenuSection, VisibleSection};
pub use routing::{Page, Route, RouteMatch, RouteTable};
pub use sidebar::{SidebarRegistry, SidebarState};
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
