//! Incoming request messages.
//!
//! A request is a single object with a `type` discriminator and an
//! optional payload. Unrecognized types and malformed payloads do not
//! parse; the router drops them without replying.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::TabId;

// ============================================================================
// Request
// ============================================================================

/// A request from the UI context to the background context.
///
/// # Wire Format
///
/// ```json
/// { "type": "GET_DUPLICATE_TABS" }
/// { "type": "REMOVE_TABS", "tabIds": [3, 7] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Snapshot read of the current duplicate state.
    #[serde(rename = "GET_DUPLICATE_TABS")]
    GetDuplicateTabs,

    /// Close the listed tabs.
    #[serde(rename = "REMOVE_TABS")]
    RemoveTabs {
        /// Tabs to close.
        #[serde(rename = "tabIds")]
        tab_ids: Vec<TabId>,
    },
}

impl Request {
    /// Parses a raw incoming message.
    ///
    /// Returns `None` for unrecognized types and malformed payloads, which
    /// the router silently ignores rather than erroring.
    #[must_use]
    pub fn parse(raw: &Value) -> Option<Self> {
        serde_json::from_value(raw.clone()).ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_get_duplicate_tabs() {
        let raw = json!({ "type": "GET_DUPLICATE_TABS" });
        assert_eq!(Request::parse(&raw), Some(Request::GetDuplicateTabs));
    }

    #[test]
    fn test_parse_remove_tabs() {
        let raw = json!({ "type": "REMOVE_TABS", "tabIds": [3, 7] });
        assert_eq!(
            Request::parse(&raw),
            Some(Request::RemoveTabs {
                tab_ids: vec![TabId::new(3), TabId::new(7)],
            })
        );
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let raw = json!({ "type": "OPEN_SETTINGS" });
        assert_eq!(Request::parse(&raw), None);
    }

    #[test]
    fn test_remove_tabs_without_payload_is_ignored() {
        let raw = json!({ "type": "REMOVE_TABS" });
        assert_eq!(Request::parse(&raw), None);
    }

    #[test]
    fn test_non_object_is_ignored() {
        assert_eq!(Request::parse(&json!("GET_DUPLICATE_TABS")), None);
        assert_eq!(Request::parse(&json!(42)), None);
    }

    #[test]
    fn test_request_serializes_with_type_tag() {
        let raw = serde_json::to_value(Request::RemoveTabs {
            tab_ids: vec![TabId::new(5)],
        })
        .expect("serialize");

        assert_eq!(raw["type"], "REMOVE_TABS");
        assert_eq!(raw["tabIds"][0], 5);
    }
}
