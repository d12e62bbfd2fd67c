//! Parser for `git diff --name-status -z` output.

use super::DiffError;
use crate::models::{ChangeRecord, ChangeStatus};

/// Parse NUL-separated name-status output into ordered change records.
///
/// Each record is `<status> NUL <path>`, or `<status> NUL <old> NUL <new>`
/// for renames and copies, where the record carries the head-side path.
/// The `-z` format never quotes paths, so non-ASCII and otherwise special
/// file names arrive verbatim.
pub fn parse_name_status(raw: &str) -> Result<Vec<ChangeRecord>, DiffError> {
    let mut records = Vec::new();
    let mut fields = raw.split('\0');

    while let Some(code) = fields.next() {
        // The stream is NUL-terminated, leaving one empty trailing field.
        if code.is_empty() {
            continue;
        }

        let status = ChangeStatus::from_code(code)
            .ok_or_else(|| DiffError::ParseError(format!("unrecognized status {code:?}")))?;

        let first = fields
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DiffError::ParseError(format!("missing path after {code:?}")))?;

        // Renames and copies carry two paths; keep the head-side one.
        let path = if matches!(status, ChangeStatus::Renamed | ChangeStatus::Copied) {
            fields.next().filter(|p| !p.is_empty()).ok_or_else(|| {
                DiffError::ParseError(format!("missing destination path after {code:?}"))
            })?
        } else {
            first
        };

        records.push(ChangeRecord::new(path, status));
    }

    Ok(records)
}
