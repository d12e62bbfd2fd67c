//! Deterministic derivation of bundle keys from file paths.
//!
//! A key must be short, lowercase, and safe to use both as a values key and
//! as part of a volume name, so the path is first put through a reversible
//! binary-to-text encoding (base64) and then sanitized. Truncation makes the
//! mapping lossy: two distinct paths can share a key. That limitation is
//! deliberate and is not detected here (see [`encode`]).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::constants::KEY_MAX_LEN;

/// Derive the bundle key for a repo-relative path.
///
/// Algorithm: base64 the path bytes, lowercase, collapse every maximal run
/// of characters outside `[a-z0-9]` into a single hyphen, strip boundary
/// hyphens, truncate to [`KEY_MAX_LEN`] characters, strip again.
///
/// Pure and deterministic; total for non-empty paths (paths come from a
/// real diff and are never empty). Distinct paths sharing a long enough
/// prefix truncate to the same key; callers own collision avoidance.
pub fn encode(path: &str) -> String {
    let lowered = STANDARD.encode(path.as_bytes()).to_ascii_lowercase();

    let mut key = String::with_capacity(lowered.len());
    let mut prev_hyphen = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            key.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            key.push('-');
            prev_hyphen = true;
        }
    }

    let mut key: String = key.trim_matches('-').chars().take(KEY_MAX_LEN).collect();
    // Truncation can re-expose a trailing hyphen.
    while key.ends_with('-') {
        key.pop();
    }
    key
}
