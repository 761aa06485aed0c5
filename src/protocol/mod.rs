//! Cross-context message protocol.
//!
//! The UI context and the background context share no memory; they
//! exchange single request/response objects over an asynchronous channel.
//!
//! # Protocol Overview
//!
//! | Request | Payload | Response |
//! |---------|---------|----------|
//! | `GET_DUPLICATE_TABS` | none | ordered list of [`GroupView`] |
//! | `REMOVE_TABS` | `tabIds` | [`RemovalReply`] |
//!
//! Unrecognized request types receive no response at all; the channel is
//! not held open for them.

// ============================================================================
// Submodules
// ============================================================================

/// Incoming request messages.
pub mod request;

/// Response and persisted wire shapes.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use request::Request;
pub use response::{GroupView, RemovalReply, TabView};
