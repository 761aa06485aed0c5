//! Tab deduplication - duplicate browser tab detection and removal.
//!
//! This library detects open tabs pointing at the same effective address
//! and coordinates closing the extras. It is split the way the hosting
//! browser splits it: a long-lived background context that observes tab
//! lifecycle events and keeps the duplicate state current, and a
//! short-lived UI context that queries that state and issues removals.
//!
//! # Architecture
//!
//! ```text
//! host lifecycle events ──► DuplicationCache ──► persisted storage
//!                              │    ▲                   │
//!              TabInventory ◄──┘    │                   ▼
//!                   │          group()           UI direct read
//!                   ▼
//!            MessageRouter ◄──── UI requests (GET / REMOVE)
//!                   │
//!                   ▼
//!           RemovalCoordinator ──► host mutation API ──► lifecycle event
//! ```
//!
//! Key design points:
//!
//! - Duplicates are keyed by **origin + path**; query string and fragment
//!   are deliberately discarded
//! - Pinned and active tabs never participate in grouping
//! - The state is replaced wholesale per scan, never patched
//! - Removal batches run concurrently and report one collapsed outcome
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use tab_dedup::{
//!     DuplicationCache, MemoryHost, MemoryStorage, MessageRouter, RemovalCoordinator, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let host = MemoryHost::new();
//!     let storage = MemoryStorage::new();
//!
//!     let cache = DuplicationCache::spawn(
//!         Arc::new(host.clone()),
//!         Arc::new(storage),
//!         host.events(),
//!     )
//!     .await;
//!     let removal = RemovalCoordinator::new(Arc::new(host.clone()));
//!
//!     let handle = MessageRouter::new(cache, removal).spawn();
//!     let duplicates = handle.request(json!({ "type": "GET_DUPLICATE_TABS" })).await?;
//!     println!("{duplicates:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dedup`] | Canonicalization, inventory, grouping |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`host`] | Host boundary: traits, events, in-memory host |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Cross-context message types |
//! | [`service`] | Background services: cache, removal, router |

// ============================================================================
// Modules
// ============================================================================

/// Duplicate-detection core: tab snapshots and duplicate groups.
///
/// - [`dedup::canonical`] - URL canonicalization
/// - [`dedup::inventory`] - tab inventory over the host
/// - [`dedup::grouper`] - pure grouping function
pub mod dedup;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Host browser boundary.
///
/// Trait seams for the tab API and persistent storage, the lifecycle
/// event bus, and an in-memory implementation.
pub mod host;

/// Type-safe identifiers for host entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Cross-context message protocol.
///
/// Request and response wire shapes for the UI/background channel.
pub mod protocol;

/// Background services: cache, removal, routing.
pub mod service;

// ============================================================================
// Re-exports
// ============================================================================

// Core types
pub use dedup::{DuplicateGroup, DuplicationState, TabInventory, TabRecord, canonical_key, group};

// Error types
pub use error::{Error, Result};

// Host boundary
pub use host::{
    EventBus, EventSubscription, HostTab, HostWindow, MemoryHost, MemoryStorage, STORAGE_KEY,
    StorageHost, TabEvent, TabHost, UpdateStatus,
};

// Identifier types
pub use identifiers::{SubscriptionId, TabId, WindowId};

// Protocol types
pub use protocol::{GroupView, RemovalReply, Request, TabView};

// Services
pub use service::{DuplicationCache, MessageRouter, RemovalCoordinator, RouterHandle};
