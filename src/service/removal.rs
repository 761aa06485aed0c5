//! Batch tab removal coordination.
//!
//! One host removal call per unique id, dispatched concurrently because
//! responsiveness matters more than sequencing here. Outcomes are
//! collected per id internally, then collapsed to the aggregate
//! [`RemovalReply`] the protocol exposes: all removals completed means
//! success; any rejection means failure carrying the first observed
//! failure's message. Removals that completed before a failing one are
//! neither rolled back nor individually reported.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::future::join_all;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::error::Result;
use crate::host::TabHost;
use crate::identifiers::TabId;
use crate::protocol::RemovalReply;

// ============================================================================
// RemovalCoordinator
// ============================================================================

/// Executes batch tab removal against the host mutation API.
#[derive(Clone)]
pub struct RemovalCoordinator {
    host: Arc<dyn TabHost>,
}

impl RemovalCoordinator {
    /// Creates a coordinator over a tab host.
    #[inline]
    #[must_use]
    pub fn new(host: Arc<dyn TabHost>) -> Self {
        Self { host }
    }

    /// Removes the listed tabs and reports the aggregate outcome.
    ///
    /// Duplicate ids in the input are collapsed: exactly one host call is
    /// issued per unique id. An empty list reports success.
    pub async fn remove(&self, tab_ids: &[TabId]) -> RemovalReply {
        let mut seen = FxHashSet::default();
        let unique: Vec<TabId> = tab_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let calls = unique.iter().map(|&id| {
            let host = Arc::clone(&self.host);
            async move { (id, host.remove_tab(id).await) }
        });
        let outcomes: Vec<(TabId, Result<()>)> = join_all(calls).await;

        for (tab_id, outcome) in &outcomes {
            if let Err(error) = outcome {
                warn!(%tab_id, %error, "Tab removal rejected");
            }
        }

        match outcomes.iter().find_map(|(_, r)| r.as_ref().err()) {
            Some(first) => RemovalReply::failure(first.to_string()),
            None => {
                debug!(count = unique.len(), "Batch removal completed");
                RemovalReply::ok()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostTab, MemoryHost};
    use crate::identifiers::WindowId;

    fn host_with_tabs(ids: &[u32]) -> MemoryHost {
        let host = MemoryHost::new();
        for &id in ids {
            host.open_tab(
                WindowId::new(1),
                HostTab {
                    id: TabId::new(id),
                    url: format!("https://example.com/{id}"),
                    title: format!("Tab {id}"),
                    pinned: false,
                    active: false,
                },
            );
        }
        host
    }

    #[tokio::test]
    async fn test_all_removals_complete() {
        let host = host_with_tabs(&[1, 2]);
        let coordinator = RemovalCoordinator::new(Arc::new(host.clone()));

        let reply = coordinator
            .remove(&[TabId::new(1), TabId::new(2)])
            .await;

        assert!(reply.success);
        assert!(reply.error.is_none());
        assert!(host.open_tab_ids().is_empty());
    }

    #[tokio::test]
    async fn test_one_call_per_unique_id() {
        let host = host_with_tabs(&[1]);
        let coordinator = RemovalCoordinator::new(Arc::new(host.clone()));

        let reply = coordinator
            .remove(&[TabId::new(1), TabId::new(1), TabId::new(1)])
            .await;

        assert!(reply.success);
        assert_eq!(host.removal_calls(), vec![TabId::new(1)]);
    }

    #[tokio::test]
    async fn test_any_rejection_fails_the_batch() {
        let host = host_with_tabs(&[1, 2, 3]);
        host.fail_removal_of(TabId::new(2));
        let coordinator = RemovalCoordinator::new(Arc::new(host.clone()));

        let reply = coordinator
            .remove(&[TabId::new(1), TabId::new(2), TabId::new(3)])
            .await;

        assert!(!reply.success);
        let message = reply.error.expect("failure message");
        assert!(!message.is_empty());
        assert!(message.contains("tab-2"));

        // Removals that completed are not rolled back.
        assert_eq!(host.open_tab_ids(), vec![TabId::new(2)]);
        assert_eq!(host.removal_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_batch_reports_success() {
        let host = host_with_tabs(&[]);
        let coordinator = RemovalCoordinator::new(Arc::new(host.clone()));

        let reply = coordinator.remove(&[]).await;
        assert!(reply.success);
        assert!(host.removal_calls().is_empty());
    }
}
