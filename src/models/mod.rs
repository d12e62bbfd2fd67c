//! Core data model: change records, encoded entries, release names, run reports.

pub mod change;
pub mod overlay;

pub use change::{ChangeRecord, ChangeStatus, EncodedEntry};
pub use overlay::{MountsDoc, OverlaySet, VolumeMount, VolumeSource, VolumesDoc};

use serde::{Deserialize, Serialize};

use crate::constants::{APP_RELEASE_PREFIX, BUNDLE_RELEASE_PREFIX, VOLUME_NAME_PREFIX};

/// The pair of package-manager release names scoping one pull request.
///
/// Both names derive solely from the PR number, so repeated runs for the
/// same PR converge on the same releases instead of accumulating new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSet {
    /// Pull request number the releases are scoped to.
    pub pr_number: u64,
    /// Release name of the configuration bundle, `preview-injection-<PR>`.
    pub bundle: String,
    /// Release name of the preview application, `preview-<PR>`.
    pub app: String,
}

impl ReleaseSet {
    pub fn for_pr(pr_number: u64) -> Self {
        Self {
            pr_number,
            bundle: format!("{BUNDLE_RELEASE_PREFIX}{pr_number}"),
            app: format!("{APP_RELEASE_PREFIX}{pr_number}"),
        }
    }
}

/// Name of the injection volume for a bundle key.
pub fn volume_name(key: &str) -> String {
    format!("{VOLUME_NAME_PREFIX}{key}")
}

/// Outcome of one pipeline run, consumed by the output renderers.
///
/// The markdown rendering of this report is the body handed to the external
/// PR-commenting collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Release names for this pull request.
    pub releases: ReleaseSet,
    /// The `(key, path)` pairs both the bundle and the overlays were
    /// generated from.
    pub entries: Vec<EncodedEntry>,
    /// Generated overlay documents.
    pub overlays: OverlaySet,
    /// Captured output of the final deployment invocation.
    ///
    /// `None` in plan mode, where no package-manager call is made.
    pub deploy_output: Option<String>,
    /// Whether this was a plan-only run.
    pub dry_run: bool,
}
