//! Response and persisted wire shapes.
//!
//! [`GroupView`] is the shape sent back for `GET_DUPLICATE_TABS` and the
//! value persisted under the storage key, so the query path and the
//! direct-storage path can never disagree about the format.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::dedup::{DuplicateGroup, DuplicationState};
use crate::identifiers::{TabId, WindowId};

// ============================================================================
// TabView
// ============================================================================

/// One tab as listed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabView {
    /// Tab identifier, used by the UI's close action.
    pub id: TabId,

    /// Page title.
    pub title: String,

    /// Owning window.
    #[serde(rename = "windowId")]
    pub window_id: WindowId,
}

// ============================================================================
// GroupView
// ============================================================================

/// One duplicate group as listed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    /// Canonical URL key shared by the group.
    pub url: String,

    /// Member tabs in scan order.
    pub tabs: Vec<TabView>,
}

impl From<&DuplicateGroup> for GroupView {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            url: group.url.clone(),
            tabs: group
                .tabs
                .iter()
                .map(|tab| TabView {
                    id: tab.id,
                    title: tab.title.clone(),
                    window_id: tab.window_id,
                })
                .collect(),
        }
    }
}

impl GroupView {
    /// Projects a duplication state into its wire shape, one entry per
    /// group, preserving group order.
    #[must_use]
    pub fn from_state(state: &DuplicationState) -> Vec<Self> {
        state.groups().iter().map(Self::from).collect()
    }
}

// ============================================================================
// RemovalReply
// ============================================================================

/// Aggregate outcome of a `REMOVE_TABS` request.
///
/// Collapses a concurrent batch to one boolean plus an optional message;
/// the caller cannot tell which subset actually closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReply {
    /// `true` when every removal completed.
    pub success: bool,

    /// Message of the first observed failure, when `success` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemovalReply {
    /// Creates a success reply.
    #[inline]
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Creates a failure reply carrying the first observed failure message.
    #[inline]
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::TabRecord;

    fn record(id: u32, url: &str, window: u32) -> TabRecord {
        TabRecord {
            id: TabId::new(id),
            url: url.to_string(),
            title: format!("Tab {id}"),
            window_id: WindowId::new(window),
            pinned: false,
            active: false,
        }
    }

    #[test]
    fn test_group_view_projection() {
        let state = DuplicationState::from_groups(vec![DuplicateGroup {
            url: "https://example.com/".to_string(),
            tabs: vec![
                record(1, "https://example.com/", 1),
                record(2, "https://example.com/", 2),
            ],
        }]);

        let views = GroupView::from_state(&state);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].url, "https://example.com/");
        assert_eq!(views[0].tabs.len(), 2);
        assert_eq!(views[0].tabs[1].window_id, WindowId::new(2));
    }

    #[test]
    fn test_group_view_wire_fields() {
        let view = GroupView {
            url: "https://example.com/".to_string(),
            tabs: vec![TabView {
                id: TabId::new(1),
                title: "Example".to_string(),
                window_id: WindowId::new(4),
            }],
        };

        let raw = serde_json::to_value(&view).expect("serialize");
        assert_eq!(raw["tabs"][0]["windowId"], 4);
        assert_eq!(raw["tabs"][0]["id"], 1);
    }

    #[test]
    fn test_removal_reply_success_omits_error() {
        let raw = serde_json::to_value(RemovalReply::ok()).expect("serialize");
        assert_eq!(raw["success"], true);
        assert!(raw.get("error").is_none());
    }

    #[test]
    fn test_removal_reply_failure_carries_message() {
        let reply = RemovalReply::failure("no such tab");
        let raw = serde_json::to_value(&reply).expect("serialize");
        assert_eq!(raw["success"], false);
        assert_eq!(raw["error"], "no such tab");
    }
}
