//! Bundle publisher: one upgrade that materializes every changed file as a
//! keyed entry of the pull request's configuration bundle.

use std::path::Path;

use indexmap::IndexMap;

use crate::config::Config;
use crate::constants::BUNDLE_VALUES_PREFIX;
use crate::helm::{HelmClient, HelmError, UpgradeRequest};
use crate::models::{EncodedEntry, ReleaseSet};

/// Build the bundle upgrade for this run.
///
/// One `--set-file configs.<key>=<checkout path>` per entry; helm reads the
/// file bytes itself, so binary content survives the boundary untouched. An
/// empty entry list still yields a valid upgrade publishing an empty bundle.
///
/// Keys are assumed unique; if two paths collided during encoding the later
/// entry silently wins (documented limitation, not detected here).
pub fn build_request(
    entries: &[EncodedEntry],
    repo_root: &Path,
    releases: &ReleaseSet,
    config: &Config,
) -> UpgradeRequest {
    let mut set_files = IndexMap::with_capacity(entries.len());
    for entry in entries {
        set_files.insert(
            format!("{BUNDLE_VALUES_PREFIX}.{}", entry.key),
            repo_root.join(&entry.path),
        );
    }

    UpgradeRequest {
        release: releases.bundle.clone(),
        chart: config.charts.bundle.clone(),
        namespace: config.cluster.namespace.clone(),
        set_files,
        values_files: Vec::new(),
    }
}

/// Publish the bundle, returning helm's captured output.
///
/// A failure here is terminal for the run; no partial bundle is assumed
/// to exist afterwards.
pub async fn publish(
    helm: &dyn HelmClient,
    entries: &[EncodedEntry],
    repo_root: &Path,
    releases: &ReleaseSet,
    config: &Config,
) -> Result<String, HelmError> {
    let request = build_request(entries, repo_root, releases, config);
    helm.upgrade(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn entry(path: &str, key: &str) -> EncodedEntry {
        EncodedEntry {
            path: path.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn one_set_file_per_entry_keyed_under_configs() {
        let releases = ReleaseSet::for_pr(42);
        let entries = vec![
            entry("tools/foo.xml", "dg9vbhmvzm9v"),
            entry("a/b.py", "ys9ilnb5"),
        ];
        let request = build_request(&entries, Path::new("/checkout"), &releases, &Config::default());

        assert_eq!(request.release, "preview-injection-42");
        assert_eq!(
            request.set_files.get("configs.dg9vbhmvzm9v"),
            Some(&PathBuf::from("/checkout/tools/foo.xml"))
        );
        assert_eq!(
            request.set_files.get("configs.ys9ilnb5"),
            Some(&PathBuf::from("/checkout/a/b.py"))
        );
        assert_eq!(request.set_files.len(), 2);
        assert!(request.values_files.is_empty());
    }

    #[test]
    fn empty_entries_publish_an_empty_bundle() {
        let releases = ReleaseSet::for_pr(7);
        let request = build_request(&[], Path::new("/checkout"), &releases, &Config::default());
        assert!(request.set_files.is_empty());
        assert_eq!(request.release, "preview-injection-7");
    }

    #[test]
    fn namespace_and_chart_come_from_config() {
        let mut config = Config::default();
        config.charts.bundle = "oci://reg/charts/bundle".to_string();
        config.cluster.namespace = Some("previews".to_string());

        let releases = ReleaseSet::for_pr(1);
        let request = build_request(&[], Path::new("/r"), &releases, &config);
        assert_eq!(request.chart, "oci://reg/charts/bundle");
        assert_eq!(request.namespace.as_deref(), Some("previews"));
    }

    #[test]
    fn colliding_keys_silently_keep_the_later_path() {
        let releases = ReleaseSet::for_pr(9);
        let entries = vec![entry("dir/one.py", "same"), entry("dir/two.py", "same")];
        let request = build_request(&entries, Path::new("/r"), &releases, &Config::default());
        assert_eq!(request.set_files.len(), 1);
        assert_eq!(
            request.set_files.get("configs.same"),
            Some(&PathBuf::from("/r/dir/two.py"))
        );
    }
}
