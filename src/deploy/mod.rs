//! Deployment driver: the second upgrade, merging base values with the
//! generated overlays into the preview application release.
//!
//! Runs only after the bundle publish succeeded, so every volume the
//! overlays reference has a live bundle entry behind it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, OnceLock};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::helm::{HelmClient, HelmError, UpgradeRequest};
use crate::models::{OverlaySet, ReleaseSet};

/// Errors from the deployment driver.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("failed to stage values files: {0}")]
    Stage(#[from] std::io::Error),

    #[error("failed to serialize overlay document: {0}")]
    Serialize(#[from] serde_yaml_ng::Error),

    #[error(transparent)]
    Helm(#[from] HelmError),
}

/// Per-release ordering gate.
///
/// Upgrades to the same release name race at the package-manager layer, so
/// concurrent in-process runs for the same pull request are serialized
/// here. Runs for different pull requests use different release names and
/// proceed independently. Cross-process runs remain unsynchronized.
fn release_gate(release: &str) -> Arc<Mutex<()>> {
    static GATES: OnceLock<StdMutex<HashMap<String, Arc<Mutex<()>>>>> = OnceLock::new();
    let gates = GATES.get_or_init(|| StdMutex::new(HashMap::new()));
    let mut map = gates.lock().unwrap_or_else(|e| e.into_inner());
    map.entry(release.to_string()).or_default().clone()
}

/// Upgrade the preview application release.
///
/// Stages the base values and both overlay documents as files in a per-run
/// temp directory and applies them in merge order (base, volumes, mounts).
/// Returns helm's captured output, which becomes the report body. Any
/// failure is terminal; the already-published bundle is not rolled back.
pub async fn deploy(
    helm: &dyn HelmClient,
    base_values: &str,
    overlays: &OverlaySet,
    releases: &ReleaseSet,
    config: &Config,
) -> Result<String, DeployError> {
    let staging = tempfile::tempdir()?;

    let base_path = staging.path().join("base.yaml");
    let volumes_path = staging.path().join("volumes.yaml");
    let mounts_path = staging.path().join("mounts.yaml");

    tokio::fs::write(&base_path, base_values).await?;
    tokio::fs::write(&volumes_path, overlays.volumes_yaml()?).await?;
    tokio::fs::write(&mounts_path, overlays.mounts_yaml()?).await?;

    let request = UpgradeRequest {
        release: releases.app.clone(),
        chart: config.charts.app.clone(),
        namespace: config.cluster.namespace.clone(),
        set_files: Default::default(),
        values_files: vec![base_path, volumes_path, mounts_path],
    };

    let gate = release_gate(&releases.app);
    let _held = gate.lock().await;
    let output = helm.upgrade(&request).await?;
    Ok(output)
}
