//! Change-related types: per-file diff status, change records, encoded entries.

use serde::{Deserialize, Serialize};
use strum::Display;

/// How a path differs between the two commit references.
///
/// Mirrors git's one-letter `--name-status` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ChangeStatus {
    Added,
    Modified,
    Copied,
    Deleted,
    Renamed,
    TypeChanged,
    Unmerged,
    Unknown,
    Broken,
}

impl ChangeStatus {
    /// Parse a git status code, tolerating similarity-score suffixes
    /// (`R100`, `C075`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.chars().next()? {
            'A' => Some(Self::Added),
            'M' => Some(Self::Modified),
            'C' => Some(Self::Copied),
            'D' => Some(Self::Deleted),
            'R' => Some(Self::Renamed),
            'T' => Some(Self::TypeChanged),
            'U' => Some(Self::Unmerged),
            'X' => Some(Self::Unknown),
            'B' => Some(Self::Broken),
            _ => None,
        }
    }

    /// Whether a change of this kind can be re-expressed as a
    /// "content at path X" override.
    ///
    /// Only additions and in-place modifications qualify; everything else
    /// trips the safety gate.
    pub fn injectable(&self) -> bool {
        matches!(self, Self::Added | Self::Modified)
    }
}

/// One changed path between the two references, in git's diff order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Repo-relative path of the file at `head`.
    pub path: String,
    /// How the path changed.
    pub status: ChangeStatus,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// A changed path paired with its derived bundle key.
///
/// Produced once per run and threaded, unmodified, through both the bundle
/// publisher and the overlay generator so the two always agree on the same
/// `(key, path)` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedEntry {
    /// Repo-relative path of the file.
    pub path: String,
    /// Derived key, matching `^[a-z0-9-]{0,30}$` with no boundary hyphen.
    pub key: String,
}
