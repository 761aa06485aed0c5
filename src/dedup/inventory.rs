//! Tab inventory collection over the host boundary.
//!
//! One populated listing call per scan: windows are flattened into a fresh
//! owned list of [`TabRecord`]s, each stamped with its owning window's id.
//! Windows without tabs contribute nothing. The inventory never retries; a
//! rejected host call surfaces as [`Error::HostQuery`](crate::Error::HostQuery)
//! and the caller decides what to do with the stale state it still holds.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::trace;

use crate::error::Result;
use crate::host::TabHost;

use super::TabRecord;

// ============================================================================
// TabInventory
// ============================================================================

/// Snapshots all open tabs across all windows.
#[derive(Clone)]
pub struct TabInventory {
    host: Arc<dyn TabHost>,
}

impl TabInventory {
    /// Creates an inventory over a tab host.
    #[inline]
    #[must_use]
    pub fn new(host: Arc<dyn TabHost>) -> Self {
        Self { host }
    }

    /// Collects a fresh snapshot of every open tab, in host scan order.
    ///
    /// # Errors
    ///
    /// [`Error::HostQuery`](crate::Error::HostQuery) if the host listing
    /// call rejects. Nothing is retried.
    pub async fn collect(&self) -> Result<Vec<TabRecord>> {
        let windows = self.host.list_windows(true).await?;

        let mut records = Vec::new();
        for window in windows {
            let Some(tabs) = window.tabs else {
                continue;
            };
            for tab in tabs {
                records.push(TabRecord {
                    id: tab.id,
                    url: tab.url,
                    title: tab.title,
                    window_id: window.id,
                    pinned: tab.pinned,
                    active: tab.active,
                });
            }
        }

        trace!(count = records.len(), "Tab inventory collected");
        Ok(records)
    }
}

// ============================================================================
// Tests
// ============================================================================
