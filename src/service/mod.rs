//! Background services: cache, removal, routing.
//!
//! These are the long-lived pieces of the background context. The cache
//! reacts to host lifecycle events, the coordinator executes removal
//! batches, and the router wires both to the cross-context protocol.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `cache` | Event-driven duplicate state cache |
//! | `removal` | Concurrent batch tab removal |
//! | `router` | Request routing and the cross-context channel |

// ============================================================================
// Submodules
// ============================================================================

/// Event-driven duplicate state cache.
pub mod cache;

/// Batch tab removal coordination.
pub mod removal;

/// Request routing between the UI and background contexts.
pub mod router;

// ============================================================================
// Re-exports
// ============================================================================

pub use cache::DuplicationCache;
pub use removal::RemovalCoordinator;
pub use router::{MessageRouter, RouterHandle};
