//! Pure grouping of tab snapshots into duplicate groups.
//!
//! One pass over the snapshot in scan order: pinned tabs, active tabs, and
//! tabs whose address is excluded by canonicalization are skipped; every
//! other tab is appended to the bucket for its canonical key. Buckets with
//! fewer than two members are dropped at the end.
//!
//! The pass is O(n) and deterministic: identical input order always yields
//! identical output order. No other ordering (alphabetical, recency) is
//! applied.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tracing::trace;

use super::canonical::canonical_key;
use super::{DuplicateGroup, DuplicationState, TabRecord};

// ============================================================================
// Grouping
// ============================================================================

/// Groups a tab snapshot into the new [`DuplicationState`].
///
/// Buckets appear in first-seen key order; members keep their relative scan
/// order. An empty or all-excluded snapshot yields an empty state.
#[must_use]
pub fn group(tabs: &[TabRecord]) -> DuplicationState {
    // Buckets live in the Vec; the map only tracks first-seen positions so
    // output order stays deterministic.
    let mut buckets: Vec<DuplicateGroup> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for tab in tabs {
        if tab.pinned || tab.active {
            continue;
        }

        let key = match canonical_key(&tab.url) {
            Ok(key) => key,
            Err(reason) => {
                trace!(tab_id = %tab.id, ?reason, "Tab excluded from grouping");
                continue;
            }
        };

        match index.get(&key) {
            Some(&pos) => buckets[pos].tabs.push(tab.clone()),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(DuplicateGroup {
                    url: key,
                    tabs: vec![tab.clone()],
                });
            }
        }
    }

    buckets.retain(|bucket| bucket.len() >= 2);
    DuplicationState::from_groups(buckets)
}

// ============================================================================
// Tests
// ============================================================================
