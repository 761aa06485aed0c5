//! URL canonicalization for duplicate grouping.
//!
//! Maps a tab's raw address to its grouping key: `origin + path`, with the
//! query string and fragment discarded. Two tabs at the same origin and path
//! but different query or fragment count as duplicates of each other. That
//! normalization is deliberate and load-bearing, not an oversight.
//!
//! Addresses that cannot participate in grouping are reported as an
//! [`Exclusion`] instead of a key:
//!
//! | Reason | Addresses |
//! |--------|-----------|
//! | [`Exclusion::Missing`] | Empty address (tab never loaded one) |
//! | [`Exclusion::Malformed`] | Unparsable, or opaque-origin (`data:` etc.) |
//! | [`Exclusion::Privileged`] | Browser-internal schemes (`chrome://`, `about:`, ...) |

// ============================================================================
// Imports
// ============================================================================

use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Browser-internal schemes whose tabs never participate in grouping.
const PRIVILEGED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "about",
    "moz-extension",
    "view-source",
    "devtools",
    "edge",
];

// ============================================================================
// Exclusion
// ============================================================================

/// Reason a tab's address is excluded from grouping.
///
/// Exclusions are handled locally by the grouper and never surface as
/// errors; an excluded tab is simply invisible to duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The address is empty.
    Missing,

    /// The address does not parse, or has an opaque origin that would
    /// serialize as `"null"` and silently group unrelated tabs.
    Malformed,

    /// The address uses a browser-internal scheme.
    Privileged,
}

// ============================================================================
// Canonicalization
// ============================================================================

/// Maps a raw address to its canonical grouping key.
///
/// Returns the key `origin + path` on success, or the [`Exclusion`] reason
/// when the tab must not participate in grouping.
///
/// # Example
///
/// ```
/// use tab_dedup::dedup::canonical_key;
///
/// let key = canonical_key("https://example.com/page?q=1#top").expect("groupable");
/// assert_eq!(key, "https://example.com/page");
/// ```
pub fn canonical_key(raw: &str) -> Result<String, Exclusion> {
    if raw.is_empty() {
        return Err(Exclusion::Missing);
    }

    let url = Url::parse(raw).map_err(|_| Exclusion::Malformed)?;

    if PRIVILEGED_SCHEMES.contains(&url.scheme()) {
        return Err(Exclusion::Privileged);
    }

    // data:, mailto: and friends have no hierarchical path and an opaque
    // origin; grouping them by "null" + path would be meaningless.
    if url.cannot_be_a_base() {
        return Err(Exclusion::Malformed);
    }

    let mut key = url.origin().ascii_serialization();
    key.push_str(url.path());
    Ok(key)
}

// ============================================================================
// Tests
// ============================================================================
