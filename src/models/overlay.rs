//! Overlay document types: volume sources and volume mounts.
//!
//! These are built as typed records and serialized to YAML in one step,
//! never assembled through text substitution.

use serde::{Deserialize, Serialize};

/// One per-file volume, backed by a single entry of the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSource {
    /// Volume name, `code-injection-<key>`.
    pub name: String,
    /// Release name of the bundle holding the file content.
    pub source_bundle: String,
    /// Bundle entry key for this file.
    pub source_key: String,
    /// File name the volume projects, the path's basename.
    pub mount_file_name: String,
}

/// Mount of a [`VolumeSource`] at the file's original relative location
/// under the container's application root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Name of the volume being mounted, `code-injection-<key>`.
    pub volume_name: String,
    /// Absolute target path inside the container.
    pub target_path: String,
}

/// The `volumes` overlay document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumesDoc {
    pub volumes: Vec<VolumeSource>,
}

/// The `volumeMounts` overlay document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountsDoc {
    pub volume_mounts: Vec<VolumeMount>,
}

/// Both overlay documents for one run, derived from the same entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySet {
    pub volumes: VolumesDoc,
    pub mounts: MountsDoc,
}

impl OverlaySet {
    /// Serialize the `volumes` document to YAML.
    pub fn volumes_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(&self.volumes)
    }

    /// Serialize the `volumeMounts` document to YAML.
    pub fn mounts_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(&self.mounts)
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.volumes.is_empty() && self.mounts.volume_mounts.is_empty()
    }
}
