//! Type-safe identifiers for host entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time:
//! a [`TabId`] cannot be passed where a [`WindowId`] is expected.
//!
//! All identifiers are serde-transparent so they serialize as plain
//! numbers on the wire and in persisted storage.
//!
//! # Identifier Types
//!
//! | Type | Identifies |
//! |------|------------|
//! | [`TabId`] | One live tab (host may reuse after close) |
//! | [`WindowId`] | One browser window |
//! | [`SubscriptionId`] | One event-bus subscription |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// TabId
// ============================================================================

/// Identifier of a live tab.
///
/// Unique among currently open tabs; the host may reuse the value after
/// the tab is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u32);

impl TabId {
    /// Creates a tab ID from its raw host value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

// ============================================================================
// WindowId
// ============================================================================

/// Identifier of a browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u32);

impl WindowId {
    /// Creates a window ID from its raw host value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

// ============================================================================
// SubscriptionId
// ============================================================================

/// Identifier of an event-bus subscription.
///
/// Allocated by [`EventBus`](crate::host::EventBus); used to unregister
/// the subscriber when its handle is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a subscription ID from a raw counter value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_id_roundtrip() {
        let id = TabId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "tab-42");

        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "42");

        let back: TabId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_window_id_display() {
        assert_eq!(WindowId::new(7).to_string(), "window-7");
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Equality only compiles within one newtype.
        assert_eq!(TabId::new(1), TabId::new(1));
        assert_ne!(SubscriptionId::new(1), SubscriptionId::new(2));
    }
}
