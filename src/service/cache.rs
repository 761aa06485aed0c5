//! Event-driven duplicate state cache.
//!
//! Owns the single current [`DuplicationState`] for the background context
//! and keeps it consistent with the live tab set. Every qualifying
//! lifecycle event triggers a full recomputation (inventory scan, pure
//! grouping, wholesale replacement) and the replacement is persisted so a
//! UI surface that outlives a background restart can read a cached value
//! directly from storage.
//!
//! The same state serves both interfaces: pull via
//! [`current_state`](DuplicationCache::current_state), push via
//! [`subscribe`](DuplicationCache::subscribe). There is exactly one
//! recomputation path, so the two can never disagree about what "current"
//! means.
//!
//! # Lost Updates
//!
//! Event handlers are not mutually excluded: two events in quick
//! succession run overlapping scans, and a slower scan may finish last and
//! overwrite a fresher result. Accepted: the next event restores
//! correctness anyway, so a lock here would only serialize host calls.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::dedup::{DuplicationState, TabInventory, group};
use crate::error::Result;
use crate::host::{EventBus, STORAGE_KEY, StorageHost, TabHost};
use crate::protocol::GroupView;

// ============================================================================
// DuplicationCache
// ============================================================================

/// Owns and maintains the current duplicate state.
///
/// Cloning shares the state and the listener task.
pub struct DuplicationCache {
    inner: Arc<CacheInner>,
    listener: Arc<JoinHandle<()>>,
}

struct CacheInner {
    /// Snapshot source.
    inventory: TabInventory,
    /// Persistence sink.
    storage: Arc<dyn StorageHost>,
    /// Current state; `send_replace` is the only writer entry point.
    state_tx: watch::Sender<DuplicationState>,
}

impl Clone for DuplicationCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            listener: Arc::clone(&self.listener),
        }
    }
}

impl DuplicationCache {
    /// Starts the cache service.
    ///
    /// Runs one recomputation before returning so the cache is populated
    /// before any query arrives, then listens for lifecycle events. A
    /// failed startup scan leaves the state empty and is only logged;
    /// the next event retries the full pipeline.
    pub async fn spawn(
        host: Arc<dyn TabHost>,
        storage: Arc<dyn StorageHost>,
        events: &EventBus,
    ) -> Self {
        let (state_tx, _) = watch::channel(DuplicationState::empty());
        let inner = Arc::new(CacheInner {
            inventory: TabInventory::new(host),
            storage,
            state_tx,
        });

        if let Err(error) = Self::recompute_inner(&inner).await {
            warn!(%error, "Startup recomputation failed, state stays empty");
        }

        let mut subscription = events.subscribe();
        let task_inner = Arc::clone(&inner);
        let listener = tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                if !event.triggers_recompute() {
                    continue;
                }

                // Each event runs its own scan; overlapping scans are not
                // mutually excluded (lost updates are corrected by the
                // next event).
                let scan_inner = Arc::clone(&task_inner);
                tokio::spawn(async move {
                    if let Err(error) = Self::recompute_inner(&scan_inner).await {
                        warn!(%error, "Recomputation skipped, state stays stale");
                    }
                });
            }
            debug!("Cache event listener stopped");
        });

        Self {
            inner,
            listener: Arc::new(listener),
        }
    }

    /// Returns a snapshot of the current duplicate state.
    #[must_use]
    pub fn current_state(&self) -> DuplicationState {
        self.inner.state_tx.borrow().clone()
    }

    /// Returns a receiver that observes every state replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DuplicationState> {
        self.inner.state_tx.subscribe()
    }

    /// Replaces the current state wholesale.
    ///
    /// Normally only recomputation calls this; it is public so the race
    /// described in the module docs stays visible and testable.
    pub fn replace(&self, new_state: DuplicationState) {
        self.inner.state_tx.send_replace(new_state);
    }

    /// Runs one full recomputation: scan, group, replace, persist.
    ///
    /// # Errors
    ///
    /// [`Error::HostQuery`](crate::Error::HostQuery) if the scan rejects,
    /// [`Error::Storage`](crate::Error::Storage) if persisting fails. The
    /// previous state is kept on scan failure.
    pub async fn recompute(&self) -> Result<()> {
        Self::recompute_inner(&self.inner).await
    }

    /// Stops the event listener.
    ///
    /// In-flight scans finish on their own; no further events trigger.
    pub fn shutdown(&self) {
        self.listener.abort();
    }

    async fn recompute_inner(inner: &CacheInner) -> Result<()> {
        let tabs = inner.inventory.collect().await?;
        let state = group(&tabs);
        let views = GroupView::from_state(&state);

        debug!(tabs = tabs.len(), groups = state.len(), "Recomputed duplicate state");

        inner.state_tx.send_replace(state);
        inner
            .storage
            .set(STORAGE_KEY, serde_json::to_value(&views)?)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostTab, MemoryHost, MemoryStorage};
    use crate::identifiers::{TabId, WindowId};

    fn host_tab(id: u32, url: &str) -> HostTab {
        HostTab {
            id: TabId::new(id),
            url: url.to_string(),
            title: format!("Tab {id}"),
            pinned: false,
            active: false,
        }
    }

    async fn spawn_cache(host: &MemoryHost, storage: &MemoryStorage) -> DuplicationCache {
        DuplicationCache::spawn(
            Arc::new(host.clone()),
            Arc::new(storage.clone()),
            host.events(),
        )
        .await
    }

    #[tokio::test]
    async fn test_startup_populates_state_before_queries() {
        let host = MemoryHost::new();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));
        host.open_tab(WindowId::new(1), host_tab(2, "https://example.com/"));
        let storage = MemoryStorage::new();

        let cache = spawn_cache(&host, &storage).await;

        let state = cache.current_state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.groups()[0].len(), 2);
        cache.shutdown();
    }

    #[tokio::test]
    async fn test_recompute_persists_group_views() {
        let host = MemoryHost::new();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));
        host.open_tab(WindowId::new(2), host_tab(2, "https://example.com/"));
        let storage = MemoryStorage::new();

        let cache = spawn_cache(&host, &storage).await;

        let stored = storage
            .get(STORAGE_KEY)
            .await
            .expect("read")
            .expect("written at startup");
        let views: Vec<GroupView> = serde_json::from_value(stored).expect("stored shape");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].url, "https://example.com/");
        assert_eq!(views[0].tabs[1].window_id, WindowId::new(2));
        cache.shutdown();
    }

    #[tokio::test]
    async fn test_lifecycle_event_triggers_recomputation() {
        let host = MemoryHost::new();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));
        let storage = MemoryStorage::new();

        let cache = spawn_cache(&host, &storage).await;
        assert!(cache.current_state().is_empty());

        let mut states = cache.subscribe();
        states.mark_unchanged();

        // A second tab finishing its load at the same address.
        host.open_tab(WindowId::new(1), host_tab(2, "https://example.com/"));

        states.changed().await.expect("state replaced");
        let state = states.borrow_and_update().clone();
        assert_eq!(state.len(), 1);
        assert_eq!(state.groups()[0].len(), 2);
        cache.shutdown();
    }

    #[tokio::test]
    async fn test_failed_scan_keeps_stale_state() {
        let host = MemoryHost::new();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));
        host.open_tab(WindowId::new(1), host_tab(2, "https://example.com/"));
        let storage = MemoryStorage::new();

        let cache = spawn_cache(&host, &storage).await;
        assert_eq!(cache.current_state().len(), 1);

        host.fail_next_query("listing unavailable");
        let err = cache.recompute().await.unwrap_err();
        assert!(err.is_host_error());

        // Stale but intact.
        assert_eq!(cache.current_state().len(), 1);
        cache.shutdown();
    }

    #[tokio::test]
    async fn test_replace_is_wholesale() {
        let host = MemoryHost::new();
        let storage = MemoryStorage::new();
        let cache = spawn_cache(&host, &storage).await;

        let mut states = cache.subscribe();
        states.mark_unchanged();

        cache.replace(DuplicationState::empty());
        states.changed().await.expect("replacement observed");
        cache.shutdown();
    }
}
