//! In-memory host implementation.
//!
//! Backs the service tests and any embedding that wants the pipeline
//! without a live browser. Behaves like the real host at the boundary:
//! the listing call snapshots windows and tabs, removals mutate the tab
//! table and emit a lifecycle event, and faults can be injected to
//! exercise the error paths.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::{TabId, WindowId};

use super::events::{EventBus, TabEvent, UpdateStatus};
use super::{HostTab, HostWindow, StorageHost, TabHost};

// ============================================================================
// MemoryHost
// ============================================================================

/// In-memory tab host.
///
/// Cloning shares the tab table, the fault flags, and the event bus.
#[derive(Clone, Default)]
pub struct MemoryHost {
    inner: Arc<Mutex<HostState>>,
    events: EventBus,
}

#[derive(Default)]
struct HostState {
    /// Windows in creation order.
    windows: Vec<MemoryWindow>,
    /// When set, the next listing call rejects with this message.
    fail_next_query: Option<String>,
    /// Tabs whose removal the host rejects.
    failing_removals: FxHashSet<TabId>,
    /// Every removal call issued, in observation order.
    removal_calls: Vec<TabId>,
}

struct MemoryWindow {
    id: WindowId,
    tabs: Vec<HostTab>,
}

impl MemoryHost {
    /// Creates a host with no windows.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lifecycle event bus.
    #[inline]
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Creates an empty window.
    pub fn open_window(&self, id: WindowId) {
        self.inner.lock().windows.push(MemoryWindow {
            id,
            tabs: Vec::new(),
        });
    }

    /// Opens a tab in a window, creating the window if needed.
    ///
    /// Emits a completed update event, like a real tab finishing its load.
    pub fn open_tab(&self, window_id: WindowId, tab: HostTab) {
        let tab_id = tab.id;
        {
            let mut state = self.inner.lock();
            match state.windows.iter_mut().find(|w| w.id == window_id) {
                Some(window) => window.tabs.push(tab),
                None => state.windows.push(MemoryWindow {
                    id: window_id,
                    tabs: vec![tab],
                }),
            }
        }
        self.events.emit(TabEvent::Updated {
            tab_id,
            status: UpdateStatus::Complete,
        });
    }

    /// Points an open tab at a new address and emits a completed update.
    ///
    /// Unknown ids are ignored; the host only notifies for live tabs.
    pub fn navigate(&self, tab_id: TabId, url: impl Into<String>) {
        let mut found = false;
        {
            let mut state = self.inner.lock();
            for window in &mut state.windows {
                if let Some(tab) = window.tabs.iter_mut().find(|t| t.id == tab_id) {
                    tab.url = url.into();
                    found = true;
                    break;
                }
            }
        }
        if found {
            self.events.emit(TabEvent::Updated {
                tab_id,
                status: UpdateStatus::Complete,
            });
        }
    }

    /// Makes the next listing call reject with `message`.
    pub fn fail_next_query(&self, message: impl Into<String>) {
        self.inner.lock().fail_next_query = Some(message.into());
    }

    /// Makes every removal of `tab_id` reject.
    pub fn fail_removal_of(&self, tab_id: TabId) {
        self.inner.lock().failing_removals.insert(tab_id);
    }

    /// Returns every removal call issued so far, in observation order.
    #[must_use]
    pub fn removal_calls(&self) -> Vec<TabId> {
        self.inner.lock().removal_calls.clone()
    }

    /// Returns the ids of all currently open tabs.
    #[must_use]
    pub fn open_tab_ids(&self) -> Vec<TabId> {
        self.inner
            .lock()
            .windows
            .iter()
            .flat_map(|w| w.tabs.iter().map(|t| t.id))
            .collect()
    }
}

#[async_trait]
impl TabHost for MemoryHost {
    async fn list_windows(&self, populate_tabs: bool) -> Result<Vec<HostWindow>> {
        let mut state = self.inner.lock();

        if let Some(message) = state.fail_next_query.take() {
            return Err(Error::host_query(message));
        }

        Ok(state
            .windows
            .iter()
            .map(|w| HostWindow {
                id: w.id,
                tabs: populate_tabs.then(|| w.tabs.clone()),
            })
            .collect())
    }

    async fn remove_tab(&self, id: TabId) -> Result<()> {
        {
            let mut state = self.inner.lock();
            state.removal_calls.push(id);

            if state.failing_removals.contains(&id) {
                return Err(Error::removal(id, "host rejected removal"));
            }

            let mut removed = false;
            for window in &mut state.windows {
                let before = window.tabs.len();
                window.tabs.retain(|t| t.id != id);
                if window.tabs.len() < before {
                    removed = true;
                    break;
                }
            }

            if !removed {
                return Err(Error::removal(id, "no such tab"));
            }
        }

        debug!(tab_id = %id, "Tab removed");
        self.events.emit(TabEvent::Removed { tab_id: id });
        Ok(())
    }
}

// ============================================================================
// MemoryStorage
// ============================================================================

/// In-memory key-value storage with change notifications.
///
/// Writes bump a generation counter observable through
/// [`changes`](Self::changes), standing in for the host's storage change
/// notifications to the UI context.
#[derive(Clone)]
pub struct MemoryStorage {
    values: Arc<Mutex<FxHashMap<String, Value>>>,
    change_tx: watch::Sender<u64>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        let (change_tx, _) = watch::channel(0);
        Self {
            values: Arc::new(Mutex::new(FxHashMap::default())),
            change_tx,
        }
    }
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a receiver that observes the write generation.
    #[inline]
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.change_tx.subscribe()
    }
}

#[async_trait]
impl StorageHost for MemoryStorage {
    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.lock().insert(key.to_string(), value);
        self.change_tx.send_modify(|generation| *generation += 1);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.lock().get(key).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn host_tab(id: u32, url: &str) -> HostTab {
        HostTab {
            id: TabId::new(id),
            url: url.to_string(),
            title: format!("Tab {id}"),
            pinned: false,
            active: false,
        }
    }

    #[tokio::test]
    async fn test_listing_snapshots_windows_and_tabs() {
        let host = MemoryHost::new();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));
        host.open_tab(WindowId::new(2), host_tab(2, "https://google.com/"));

        let windows = host.list_windows(true).await.expect("listing");
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].tabs.as_deref().map(<[HostTab]>::len), Some(1));
    }

    #[tokio::test]
    async fn test_unpopulated_listing_has_no_tabs() {
        let host = MemoryHost::new();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));

        let windows = host.list_windows(false).await.expect("listing");
        assert!(windows[0].tabs.is_none());
    }

    #[tokio::test]
    async fn test_query_fault_injection_rejects_once() {
        let host = MemoryHost::new();
        host.fail_next_query("listing unavailable");

        let err = host.list_windows(true).await.unwrap_err();
        assert!(matches!(err, Error::HostQuery { .. }));

        // Next call succeeds again.
        assert!(host.list_windows(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_removal_mutates_table_and_emits_event() {
        let host = MemoryHost::new();
        let mut sub = host.events().subscribe();
        host.open_tab(WindowId::new(1), host_tab(1, "https://example.com/"));

        // Skip the open notification.
        let _ = sub.next().await;

        host.remove_tab(TabId::new(1)).await.expect("removal");
        assert!(host.open_tab_ids().is_empty());

        let event = sub.next().await.expect("event");
        assert_eq!(
            event,
            TabEvent::Removed {
                tab_id: TabId::new(1)
            }
        );
    }

    #[tokio::test]
    async fn test_removal_of_unknown_tab_rejects() {
        let host = MemoryHost::new();
        let err = host.remove_tab(TabId::new(9)).await.unwrap_err();
        assert!(err.is_removal_error());
        assert_eq!(host.removal_calls(), vec![TabId::new(9)]);
    }

    #[tokio::test]
    async fn test_storage_roundtrip_and_change_notification() {
        let storage = MemoryStorage::new();
        let mut changes = storage.changes();
        assert_eq!(*changes.borrow_and_update(), 0);

        storage
            .set("duplicateTabs", json!([{"url": "https://example.com/"}]))
            .await
            .expect("write");

        changes.changed().await.expect("notified");
        let value = storage.get("duplicateTabs").await.expect("read");
        assert_eq!(value.expect("present")[0]["url"], "https://example.com/");
    }
}
