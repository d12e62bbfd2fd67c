//! Git CLI wrapper for the changed-file query.
//!
//! Shells out to `git` via `tokio::process::Command`.

use std::path::Path;

use super::DiffError;

/// Run `git diff --name-status -z <base> <head>` and return the raw output.
///
/// `-z` NUL-separates records and disables `core.quotepath` C-quoting, so
/// non-ASCII paths come back as the literal file name.
pub async fn name_status_diff(
    repo_root: &Path,
    base: &str,
    head: &str,
) -> Result<String, DiffError> {
    let output = tokio::process::Command::new("git")
        .args(["diff", "--name-status", "-z", base, head])
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| DiffError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiffError::GitError(format!(
            "git diff failed (exit {}): {stderr}",
            output.status
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| DiffError::GitError(format!("git output is not valid UTF-8: {e}")))
}

/// Find the root of the git repository containing `start_dir`.
pub async fn find_repo_root(start_dir: &Path) -> Result<String, DiffError> {
    let output = tokio::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start_dir)
        .output()
        .await
        .map_err(|e| DiffError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiffError::GitError(format!(
            "not a git repository: {stderr}"
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
