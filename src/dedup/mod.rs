//! Duplicate-detection core: tab snapshots and duplicate groups.
//!
//! The pipeline runs in three stages, leaves first:
//!
//! 1. [`canonical`] maps a tab's address to a grouping key
//! 2. [`inventory`] snapshots all open tabs from the host
//! 3. [`grouper`] is a pure function from a snapshot to [`DuplicationState`]
//!
//! # Data Model
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabRecord`] | Immutable snapshot of one open tab |
//! | [`DuplicateGroup`] | ≥2 tabs sharing one canonical URL key |
//! | [`DuplicationState`] | All current groups, replaced wholesale per scan |

// ============================================================================
// Submodules
// ============================================================================

/// URL canonicalization: origin + path grouping key.
pub mod canonical;

/// Pure grouping of tab snapshots into duplicate groups.
pub mod grouper;

/// Tab inventory collection over the host boundary.
pub mod inventory;

// ============================================================================
// Re-exports
// ============================================================================

pub use canonical::{Exclusion, canonical_key};
pub use grouper::group;
pub use inventory::TabInventory;

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::identifiers::{TabId, WindowId};

// ============================================================================
// TabRecord
// ============================================================================

/// Immutable snapshot of one open tab.
///
/// Records are never mutated in place; each scan produces a fresh owned
/// list and the previous one is discarded. A record only outlives its scan
/// as a member of a [`DuplicateGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    /// Tab identifier (unique per live tab, reused by the host after close).
    pub id: TabId,

    /// Absolute address. May be empty for tabs that never loaded one.
    pub url: String,

    /// Page title.
    pub title: String,

    /// Owning window.
    #[serde(rename = "windowId")]
    pub window_id: WindowId,

    /// Whether the user pinned this tab. Pinned tabs never group.
    pub pinned: bool,

    /// Whether this is the focused tab of its window. Active tabs never group.
    pub active: bool,
}

impl TabRecord {
    /// Formats the record for display as `"{title} ({url})"`.
    #[inline]
    #[must_use]
    pub fn format_tab_info(&self) -> String {
        format!("{} ({})", self.title, self.url)
    }
}

// ============================================================================
// DuplicateGroup
// ============================================================================

/// Tabs sharing one canonical URL key.
///
/// # Invariants
///
/// - `tabs.len() >= 2`
/// - no member has `pinned` or `active` set
/// - members appear in scan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Canonical URL key shared by every member.
    pub url: String,

    /// Member tabs in scan order.
    pub tabs: Vec<TabRecord>,
}

impl DuplicateGroup {
    /// Returns the number of member tabs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if the group has no members.
    ///
    /// Never true for groups produced by [`grouper::group`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

// ============================================================================
// DuplicationState
// ============================================================================

/// All current duplicate groups, in first-seen key order.
///
/// The state is always replaced wholesale on recomputation, never patched
/// incrementally, so any single reader observes a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicationState {
    groups: Vec<DuplicateGroup>,
}

impl DuplicationState {
    /// Creates an empty state.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    /// Creates a state from already-filtered groups.
    ///
    /// Callers are responsible for the group invariants; only
    /// [`grouper::group`] constructs states from raw snapshots.
    #[inline]
    #[must_use]
    pub fn from_groups(groups: Vec<DuplicateGroup>) -> Self {
        Self { groups }
    }

    /// Returns the groups in first-seen key order.
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Returns the group for a canonical key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| g.url == key)
    }

    /// Returns the number of groups.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no duplicate groups.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
