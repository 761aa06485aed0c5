//! Request routing between the UI and background contexts.
//!
//! The router answers the two protocol requests from the background side:
//! `GET_DUPLICATE_TABS` reads the cache, `REMOVE_TABS` delegates to the
//! removal coordinator. Handling is asynchronous and never blocks the
//! event loop; the reply channel stays open until the handler resolves.
//! Unrecognized or malformed messages are dropped without a reply; their
//! channel is simply not held open.
//!
//! [`MessageRouter::spawn`] turns the router into a channel-served task
//! and hands back a [`RouterHandle`], the UI side of the cross-context
//! request/response channel.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::protocol::{GroupView, Request};

use super::cache::DuplicationCache;
use super::removal::RemovalCoordinator;

// ============================================================================
// Delivery
// ============================================================================

/// One request in flight on the cross-context channel.
struct Delivery {
    /// Raw request object.
    request: Value,
    /// Reply channel, held open until the handler resolves. Dropped
    /// without sending when the request is ignored.
    reply_tx: oneshot::Sender<Value>,
}

// ============================================================================
// MessageRouter
// ============================================================================

/// Dispatches protocol requests to the background services.
#[derive(Clone)]
pub struct MessageRouter {
    cache: DuplicationCache,
    removal: RemovalCoordinator,
}

impl MessageRouter {
    /// Creates a router over the background services.
    #[inline]
    #[must_use]
    pub fn new(cache: DuplicationCache, removal: RemovalCoordinator) -> Self {
        Self { cache, removal }
    }

    /// Handles one raw request.
    ///
    /// Returns `None` for unrecognized or malformed messages, which get no
    /// response at all.
    pub async fn handle(&self, raw: &Value) -> Option<Value> {
        let Some(request) = Request::parse(raw) else {
            debug!("Ignored unrecognized message");
            return None;
        };

        let reply = match request {
            Request::GetDuplicateTabs => {
                let views = GroupView::from_state(&self.cache.current_state());
                trace!(groups = views.len(), "Duplicate state queried");
                serde_json::to_value(views)
            }
            Request::RemoveTabs { tab_ids } => {
                let outcome = self.removal.remove(&tab_ids).await;
                serde_json::to_value(outcome)
            }
        };

        // Wire shapes serialize infallibly; treat a failure like a
        // malformed message rather than crashing the background context.
        reply.ok()
    }

    /// Serves the router from a spawned task.
    ///
    /// Each delivery is handled on its own task so one slow host call
    /// cannot stall the loop.
    #[must_use]
    pub fn spawn(self) -> RouterHandle {
        let (tx, mut rx) = mpsc::unbounded_channel::<Delivery>();

        tokio::spawn(async move {
            while let Some(Delivery { request, reply_tx }) = rx.recv().await {
                let router = self.clone();
                tokio::spawn(async move {
                    if let Some(reply) = router.handle(&request).await {
                        let _ = reply_tx.send(reply);
                    }
                });
            }
            debug!("Router task stopped");
        });

        RouterHandle { tx }
    }
}

// ============================================================================
// RouterHandle
// ============================================================================

/// UI-side handle to the cross-context request/response channel.
#[derive(Clone)]
pub struct RouterHandle {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl RouterHandle {
    /// Sends a request and waits for its response.
    ///
    /// Returns `Ok(None)` when the background ignored the message (no
    /// response was ever sent).
    ///
    /// # Errors
    ///
    /// [`Error::ChannelClosed`] if the router task is gone.
    pub async fn request(&self, message: Value) -> Result<Option<Value>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(Delivery {
                request: message,
                reply_tx,
            })
            .map_err(|_| Error::ChannelClosed)?;

        match reply_rx.await {
            Ok(reply) => Ok(Some(reply)),
            // Sender dropped without replying: the message was ignored.
            Err(_) => Ok(None),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
