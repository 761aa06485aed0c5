//! Host browser boundary.
//!
//! The host owns the real tab inventory, the mutation API, the lifecycle
//! notifications, and the persistent key-value storage. This crate only
//! talks to it through the trait seams defined here, so every collaborator
//! is an explicit, testable dependency.
//!
//! ```text
//! ┌──────────────────┐   list / remove    ┌──────────────────┐
//! │ DuplicationCache │◄──────────────────►│ TabHost          │
//! │ RemovalCoord.    │                    │ (browser)        │
//! └────────┬─────────┘   TabEvent         └──────────────────┘
//!          │        ◄────────────────────  EventBus
//!          ▼ persisted groups
//! ┌──────────────────┐
//! │ StorageHost      │  ◄── read directly by the UI context
//! └──────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `events` | Tab lifecycle events and subscription bus |
//! | `memory` | In-memory host for tests and embedding |

// ============================================================================
// Submodules
// ============================================================================

/// Tab lifecycle events and the subscription bus.
pub mod events;

/// In-memory host implementation.
pub mod memory;

// ============================================================================
// Re-exports
// ============================================================================

pub use events::{EventBus, EventSubscription, TabEvent, UpdateStatus};
pub use memory::{MemoryHost, MemoryStorage};

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::{TabId, WindowId};

// ============================================================================
// Constants
// ============================================================================

/// Storage key holding the serialized duplicate-group list.
///
/// Readable and writable from either execution context.
pub const STORAGE_KEY: &str = "duplicateTabs";

// ============================================================================
// Host Shapes
// ============================================================================

/// One window as reported by the host listing call.
#[derive(Debug, Clone)]
pub struct HostWindow {
    /// Window identifier.
    pub id: WindowId,

    /// Tabs in this window. `None` when the listing was not populated or
    /// the window has no tab content to report.
    pub tabs: Option<Vec<HostTab>>,
}

/// One tab as reported by the host listing call.
#[derive(Debug, Clone)]
pub struct HostTab {
    /// Tab identifier.
    pub id: TabId,

    /// Absolute address. Empty when the tab has not loaded one.
    pub url: String,

    /// Page title.
    pub title: String,

    /// Whether the user pinned this tab.
    pub pinned: bool,

    /// Whether this is the focused tab of its window.
    pub active: bool,
}

// ============================================================================
// TabHost
// ============================================================================

/// Host tab query and mutation API.
///
/// Both calls are asynchronous suspension points; neither is retried by
/// this crate.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Lists all windows, with their tabs populated when requested.
    ///
    /// # Errors
    ///
    /// [`Error::HostQuery`](crate::Error::HostQuery) if the underlying host
    /// call rejects.
    async fn list_windows(&self, populate_tabs: bool) -> Result<Vec<HostWindow>>;

    /// Closes one tab.
    ///
    /// # Errors
    ///
    /// [`Error::Removal`](crate::Error::Removal) if the host rejects the
    /// removal (unknown id, tab already gone, ...).
    async fn remove_tab(&self, id: TabId) -> Result<()>;
}

// ============================================================================
// StorageHost
// ============================================================================

/// Host persistent key-value storage.
///
/// One writer (the background cache) and any number of direct readers (UI
/// surfaces that outlive a background restart).
#[async_trait]
pub trait StorageHost: Send + Sync {
    /// Writes a value under a key, overwriting the previous value.
    ///
    /// # Errors
    ///
    /// [`Error::Storage`](crate::Error::Storage) if the host rejects the write.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Reads the value under a key, if any.
    ///
    /// # Errors
    ///
    /// [`Error::Storage`](crate::Error::Storage) if the host rejects the read.
    async fn get(&self, key: &str) -> Result<Option<Value>>;
}
