//! Error types for tab deduplication.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use tab_dedup::{Result, Error};
//!
//! async fn example(inventory: &TabInventory) -> Result<()> {
//!     let tabs = inventory.collect().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Host query | [`Error::HostQuery`] |
//! | Mutation | [`Error::Removal`] |
//! | Persistence | [`Error::Storage`] |
//! | External | [`Error::Json`], [`Error::ChannelClosed`] |
//!
//! Malformed tab addresses are deliberately *not* represented here: they are
//! handled locally by exclusion during canonicalization and never propagate
//! (see [`crate::dedup::canonical`]).

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Host Query Errors
    // ========================================================================
    /// The host tab/window listing call rejected.
    ///
    /// Surfaced to the caller of `TabInventory::collect`; callers do not
    /// retry automatically and the previous duplicate state stays in place.
    #[error("Host query failed: {message}")]
    HostQuery {
        /// Description of the host failure.
        message: String,
    },

    // ========================================================================
    // Mutation Errors
    // ========================================================================
    /// A host tab-removal call rejected.
    ///
    /// Carries the id of the tab whose removal failed. Batch removal
    /// collapses these into a single aggregate reply.
    #[error("Failed to remove {tab_id}: {message}")]
    Removal {
        /// Tab whose removal was rejected.
        tab_id: TabId,
        /// Description of the removal failure.
        message: String,
    },

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// Reading or writing the persisted duplicate-group value failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request or reply channel closed before a response arrived.
    #[error("Channel closed")]
    ChannelClosed,
}

impl From<RecvError> for Error {
    fn from(_: RecvError) -> Self {
        Self::ChannelClosed
    }
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a host query error.
    #[inline]
    pub fn host_query(message: impl Into<String>) -> Self {
        Self::HostQuery {
            message: message.into(),
        }
    }

    /// Creates a removal error for one tab.
    #[inline]
    pub fn removal(tab_id: TabId, message: impl Into<String>) -> Self {
        Self::Removal {
            tab_id,
            message: message.into(),
        }
    }

    /// Creates a storage error.
    #[inline]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error came from the host boundary.
    ///
    /// Host errors leave the cached duplicate state stale rather than
    /// crashing the background service.
    #[inline]
    #[must_use]
    pub fn is_host_error(&self) -> bool {
        matches!(self, Self::HostQuery { .. } | Self::Removal { .. })
    }

    /// Returns `true` if this is a removal error.
    ///
    /// Removal errors are the only kind surfaced to the UI, and only as a
    /// boolean plus a message.
    #[inline]
    #[must_use]
    pub fn is_removal_error(&self) -> bool {
        matches!(self, Self::Removal { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::host_query("listing rejected");
        assert_eq!(err.to_string(), "Host query failed: listing rejected");
    }

    #[test]
    fn test_removal_display_names_tab() {
        let err = Error::removal(TabId::new(3), "no such tab");
        assert_eq!(err.to_string(), "Failed to remove tab-3: no such tab");
    }

    #[test]
    fn test_is_host_error() {
        let query_err = Error::host_query("test");
        let removal_err = Error::removal(TabId::new(1), "test");
        let storage_err = Error::storage("test");

        assert!(query_err.is_host_error());
        assert!(removal_err.is_host_error());
        assert!(!storage_err.is_host_error());
    }

    #[test]
    fn test_is_removal_error() {
        let removal_err = Error::removal(TabId::new(1), "test");
        let query_err = Error::host_query("test");

        assert!(removal_err.is_removal_error());
        assert!(!query_err.is_removal_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
