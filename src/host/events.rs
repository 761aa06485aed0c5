//! Tab lifecycle events and the subscription bus.
//!
//! The host notifies the background context about tab activity with
//! fire-and-forget events carrying no payload guarantee beyond "something
//! changed". Subscriptions are first-class: [`EventBus::subscribe`] returns
//! an [`EventSubscription`] handle that unregisters itself when dropped, so
//! the recomputation trigger is an explicit, testable dependency rather
//! than an ambient listener.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::identifiers::{SubscriptionId, TabId};

// ============================================================================
// Types
// ============================================================================

/// Map of subscription IDs to event senders.
type SubscriberMap = FxHashMap<SubscriptionId, mpsc::UnboundedSender<TabEvent>>;

// ============================================================================
// UpdateStatus
// ============================================================================

/// Load status carried by a tab-updated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The tab is still loading.
    Loading,

    /// The tab finished loading.
    Complete,
}

// ============================================================================
// TabEvent
// ============================================================================

/// A tab lifecycle notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    /// A tab's load state changed.
    Updated {
        /// The tab that changed.
        tab_id: TabId,
        /// New load status.
        status: UpdateStatus,
    },

    /// A tab was closed.
    Removed {
        /// The tab that was closed.
        tab_id: TabId,
    },

    /// A tab moved within or between windows.
    Moved {
        /// The tab that moved.
        tab_id: TabId,
    },
}

impl TabEvent {
    /// Returns `true` if this event must trigger a full recomputation.
    ///
    /// Updates only count once the tab finished loading; removals and
    /// moves always count.
    #[inline]
    #[must_use]
    pub fn triggers_recompute(&self) -> bool {
        match self {
            Self::Updated { status, .. } => *status == UpdateStatus::Complete,
            Self::Removed { .. } | Self::Moved { .. } => true,
        }
    }
}

// ============================================================================
// EventBus
// ============================================================================

/// Fan-out bus for [`TabEvent`] notifications.
///
/// Cloning the bus shares the subscriber table. Emission never blocks:
/// events are pushed onto unbounded per-subscriber channels.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    /// Registered subscribers.
    subscribers: Mutex<SubscriberMap>,
    /// Next subscription ID.
    next_id: AtomicU64,
}

impl EventBus {
    /// Creates an empty bus.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    ///
    /// The returned handle receives every event emitted after this call
    /// and unregisters itself on drop.
    #[must_use]
    pub fn subscribe(&self) -> EventSubscription {
        let id = SubscriptionId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();

        self.inner.subscribers.lock().insert(id, tx);
        debug!(%id, "Event subscriber registered");

        EventSubscription {
            id,
            rx,
            bus: Arc::clone(&self.inner),
        }
    }

    /// Emits an event to every live subscriber.
    ///
    /// Subscribers whose receiving end is gone are pruned here.
    pub fn emit(&self, event: TabEvent) {
        let mut subscribers = self.inner.subscribers.lock();
        subscribers.retain(|id, tx| {
            let alive = tx.send(event).is_ok();
            if !alive {
                trace!(%id, "Pruned dead event subscriber");
            }
            alive
        });
    }

    /// Returns the number of registered subscribers.
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

// ============================================================================
// EventSubscription
// ============================================================================

/// Cancellation handle for one bus subscription.
///
/// Receives events via [`next`](Self::next); dropping the handle
/// unregisters the subscriber.
pub struct EventSubscription {
    /// This subscription's ID.
    id: SubscriptionId,
    /// Receiving end of the per-subscriber channel.
    rx: mpsc::UnboundedReceiver<TabEvent>,
    /// Bus the subscriber is registered with.
    bus: Arc<BusInner>,
}

impl EventSubscription {
    /// Returns this subscription's ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the bus is gone and all buffered events have
    /// been drained.
    pub async fn next(&mut self) -> Option<TabEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.subscribers.lock().remove(&self.id);
        debug!(id = %self.id, "Event subscriber unregistered");
    }
}

// ============================================================================
// Tests
// ============================================================================
