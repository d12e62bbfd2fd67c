//! Helm CLI implementation of [`HelmClient`].
//!
//! Shells out to the configured helm binary via `tokio::process::Command`.
//! No timeout is applied here; a hung invocation is bounded by the outer
//! CI job timeout.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{HelmClient, HelmError, UpgradeRequest};

/// [`HelmClient`] backed by the real helm binary.
pub struct HelmCli {
    /// Helm binary to invoke (usually just `helm`).
    binary: String,
    /// Working directory for invocations (the repo checkout).
    workdir: PathBuf,
}

impl HelmCli {
    pub fn new(binary: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            workdir: workdir.into(),
        }
    }
}

#[async_trait]
impl HelmClient for HelmCli {
    async fn upgrade(&self, request: &UpgradeRequest) -> Result<String, HelmError> {
        let output = tokio::process::Command::new(&self.binary)
            .args(request.to_args())
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| HelmError::SpawnError(format!("{}: {e}", self.binary)))?;

        if !output.status.success() {
            return Err(HelmError::CommandFailed {
                operation: "upgrade".to_string(),
                release: request.release.clone(),
                exit: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let helm = HelmCli::new("hotpatch-no-such-helm-binary", dir.path());
        let request = UpgradeRequest {
            release: "r".into(),
            chart: "c".into(),
            ..Default::default()
        };
        let err = helm.upgrade(&request).await.unwrap_err();
        assert!(matches!(err, HelmError::SpawnError(_)), "got: {err}");
    }

    #[tokio::test]
    async fn failing_command_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        // `false` ignores its argv and exits 1 with no output, which is
        // enough to exercise the non-success path.
        let helm = HelmCli::new("false", dir.path());
        let request = UpgradeRequest {
            release: "preview-9".into(),
            chart: "c".into(),
            ..Default::default()
        };
        let err = helm.upgrade(&request).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("preview-9"), "got: {msg}");
    }
}
