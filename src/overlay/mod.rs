//! Overlay generator: volume sources and mounts from one entry list.
//!
//! Both documents are derived from the same `(key, path)` pairs that drove
//! the bundle publish. The mount reconstructs each file's original relative
//! location under the application root, so the injected file lands exactly
//! where it sat in the source tree.

use std::path::Path;

use crate::models::{
    EncodedEntry, MountsDoc, OverlaySet, ReleaseSet, VolumeMount, VolumeSource, VolumesDoc,
    volume_name,
};

/// Build both overlay documents for the run.
///
/// One volume and one mount per entry, in entry order. An empty entry list
/// produces two well-formed empty documents (a plain redeploy).
pub fn generate(entries: &[EncodedEntry], releases: &ReleaseSet, app_root: &str) -> OverlaySet {
    let root = app_root.trim_end_matches('/');

    let volumes = entries
        .iter()
        .map(|entry| VolumeSource {
            name: volume_name(&entry.key),
            source_bundle: releases.bundle.clone(),
            source_key: entry.key.clone(),
            mount_file_name: basename(&entry.path).to_string(),
        })
        .collect();

    let mounts = entries
        .iter()
        .map(|entry| VolumeMount {
            volume_name: volume_name(&entry.key),
            target_path: format!("{root}/{}", entry.path),
        })
        .collect();

    OverlaySet {
        volumes: VolumesDoc { volumes },
        mounts: MountsDoc { volume_mounts: mounts },
    }
}

/// Final path component. Diff paths always name a file, never a directory.
fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}
