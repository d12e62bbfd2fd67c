//! HelmClient trait and CLI integration.
//!
//! Provides an abstraction layer over the `helm` binary so the pipeline
//! can be exercised against a recording fake in tests.

pub mod cli;

use std::path::PathBuf;

use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error;

/// Errors from the package-manager boundary.
#[derive(Error, Debug)]
pub enum HelmError {
    #[error("failed to run helm: {0}")]
    SpawnError(String),

    #[error("helm {operation} of release {release} failed (exit {exit}): {stderr}")]
    CommandFailed {
        operation: String,
        release: String,
        exit: String,
        stderr: String,
    },
}

/// One `helm upgrade --install` invocation.
///
/// `set_files` map dotted value paths to local files whose bytes helm
/// reads itself, keeping binary content intact across the boundary.
/// `IndexMap` preserves entry order so repeated runs build identical argv.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeRequest {
    /// Release name to create or mutate in place.
    pub release: String,
    /// Chart reference (name, path, or repo/chart).
    pub chart: String,
    /// Target namespace, when not the kube context default.
    pub namespace: Option<String>,
    /// `--set-file <key>=<path>` overrides, in insertion order.
    pub set_files: IndexMap<String, PathBuf>,
    /// `-f <path>` values files, applied in order.
    pub values_files: Vec<PathBuf>,
}

impl UpgradeRequest {
    /// Build the argv passed to the helm binary (without the binary itself).
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "upgrade".to_string(),
            "--install".to_string(),
            self.release.clone(),
            self.chart.clone(),
        ];
        if let Some(ref ns) = self.namespace {
            args.push("--namespace".to_string());
            args.push(ns.clone());
        }
        for path in &self.values_files {
            args.push("-f".to_string());
            args.push(path.display().to_string());
        }
        for (key, path) in &self.set_files {
            args.push("--set-file".to_string());
            args.push(format!("{key}={}", path.display()));
        }
        args
    }
}

/// Trait for driving upgrade/install operations.
///
/// Implementations own subprocess handling and error surfacing; the
/// pipeline only sees captured stdout on success.
#[async_trait]
pub trait HelmClient: Send + Sync {
    /// Perform one upgrade/install and return its captured output.
    async fn upgrade(&self, request: &UpgradeRequest) -> Result<String, HelmError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn argv_shape_for_bundle_publish() {
        let mut set_files = IndexMap::new();
        set_files.insert("configs.abc".to_string(), PathBuf::from("/repo/a.py"));
        set_files.insert("configs.xyz".to_string(), PathBuf::from("/repo/b.py"));

        let request = UpgradeRequest {
            release: "preview-injection-7".into(),
            chart: "charts/bundle".into(),
            namespace: Some("previews".into()),
            set_files,
            values_files: vec![],
        };

        assert_eq!(
            request.to_args(),
            vec![
                "upgrade",
                "--install",
                "preview-injection-7",
                "charts/bundle",
                "--namespace",
                "previews",
                "--set-file",
                "configs.abc=/repo/a.py",
                "--set-file",
                "configs.xyz=/repo/b.py",
            ]
        );
    }

    #[test]
    fn argv_shape_for_deploy_with_values_files() {
        let request = UpgradeRequest {
            release: "preview-7".into(),
            chart: "charts/app".into(),
            namespace: None,
            set_files: IndexMap::new(),
            values_files: vec![
                PathBuf::from("/tmp/base.yaml"),
                PathBuf::from("/tmp/volumes.yaml"),
                PathBuf::from("/tmp/mounts.yaml"),
            ],
        };

        let args = request.to_args();
        assert_eq!(&args[..4], &["upgrade", "--install", "preview-7", "charts/app"]);
        // Values files keep their merge order.
        let f_positions: Vec<_> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-f")
            .map(|(i, _)| args[i + 1].clone())
            .collect();
        assert_eq!(f_positions, vec!["/tmp/base.yaml", "/tmp/volumes.yaml", "/tmp/mounts.yaml"]);
    }

    #[test]
    fn set_file_order_is_insertion_order() {
        let mut set_files = IndexMap::new();
        for key in ["z", "a", "m"] {
            set_files.insert(format!("configs.{key}"), PathBuf::from(format!("/r/{key}")));
        }
        let request = UpgradeRequest {
            release: "r".into(),
            chart: "c".into(),
            ..Default::default()
        };
        let request = UpgradeRequest { set_files, ..request };

        let args = request.to_args();
        let keys: Vec<_> = args
            .iter()
            .filter(|a| a.starts_with("configs."))
            .cloned()
            .collect();
        assert_eq!(keys, vec!["configs.z=/r/z", "configs.a=/r/a", "configs.m=/r/m"]);
    }
}
