//! Diff classifier: git CLI wrapper, name-status parsing, and the safety gate.

pub mod git;
pub mod parser;

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use crate::models::ChangeRecord;

/// Errors from the diff classifier.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("git command failed: {0}")]
    GitError(String),

    #[error("diff parse error: {0}")]
    ParseError(String),

    /// The diff contains change kinds that cannot be re-expressed as a
    /// "content at path X" override. The whole run aborts, no side effects.
    #[error("unsupported change kinds, refusing to inject:{}", format_offenders(.0))]
    UnsupportedChange(Vec<ChangeRecord>),
}

fn format_offenders(records: &[ChangeRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = write!(out, "\n  {} ({})", record.path, record.status);
    }
    out
}

/// Compute the ordered changed-file list between two commit references.
///
/// Preserves git's own diff order; an empty diff yields an empty list and
/// is not an error.
pub async fn classify(
    repo_root: &Path,
    base: &str,
    head: &str,
) -> Result<Vec<ChangeRecord>, DiffError> {
    let raw = git::name_status_diff(repo_root, base, head).await?;
    parser::parse_name_status(&raw)
}

/// Safety gate: abort unless every record is an addition or in-place
/// modification.
///
/// Copied, renamed, deleted, type-changed, unmerged, unknown, and broken
/// paths cannot be safely republished as file-content overrides, so the
/// gate fails closed for the entire run rather than skipping files.
pub fn ensure_injectable(records: &[ChangeRecord]) -> Result<(), DiffError> {
    let offenders: Vec<ChangeRecord> = records
        .iter()
        .filter(|r| !r.status.injectable())
        .cloned()
        .collect();

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(DiffError::UnsupportedChange(offenders))
    }
}
