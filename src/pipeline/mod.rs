//! Sequential pipeline: classify, gate, encode, publish, generate, deploy.
//!
//! One immutable `EncodedEntry` list is computed once and threaded through
//! both the bundle publisher and the overlay generator, so the two upgrades
//! always agree on the same `(key, path)` set. The bundle publish is a
//! strict precondition of the deploy; the two calls form one logical
//! transaction with no rollback of the first on failure of the second.

use std::path::Path;

use thiserror::Error;

use crate::bundle;
use crate::config::Config;
use crate::constants::ENV_BASE_VALUES;
use crate::deploy::{self, DeployError};
use crate::diff::{self, DiffError};
use crate::encode;
use crate::helm::{HelmClient, HelmError};
use crate::models::{ChangeRecord, EncodedEntry, ReleaseSet, RunReport};
use crate::overlay;
use crate::template::{self, TemplateError};

/// Errors from the pipeline, one variant per failing stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    TemplateFetch(#[from] TemplateError),

    #[error("bundle publish failed: {0}")]
    Publish(#[from] HelmError),

    #[error("deploy failed: {0}")]
    Deploy(#[from] DeployError),
}

/// Per-run parameters supplied by the CI context.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Base commit reference of the pull request.
    pub base: String,
    /// Head commit reference of the pull request.
    pub head: String,
    /// Pull request number, sole source of release identity.
    pub pr_number: u64,
    /// Plan mode: stop after overlay generation, touch nothing.
    pub dry_run: bool,
}

/// Run the full pipeline against a checkout.
pub async fn run(
    helm: &dyn HelmClient,
    repo_root: &Path,
    config: &Config,
    options: &RunOptions,
) -> Result<RunReport, PipelineError> {
    let records = diff::classify(repo_root, &options.base, &options.head).await?;
    run_with_records(helm, repo_root, config, options, &records).await
}

/// Run the pipeline from an already-classified change list.
pub async fn run_with_records(
    helm: &dyn HelmClient,
    repo_root: &Path,
    config: &Config,
    options: &RunOptions,
    records: &[ChangeRecord],
) -> Result<RunReport, PipelineError> {
    // Fail-closed gate: nothing below runs for an uninjectable diff.
    diff::ensure_injectable(records)?;

    let entries: Vec<EncodedEntry> = records
        .iter()
        .map(|record| EncodedEntry {
            path: record.path.clone(),
            key: encode::encode(&record.path),
        })
        .collect();

    let releases = ReleaseSet::for_pr(options.pr_number);
    let overlays = overlay::generate(&entries, &releases, &config.app.root);

    if options.dry_run {
        return Ok(RunReport {
            releases,
            entries,
            overlays,
            deploy_output: None,
            dry_run: true,
        });
    }

    // Fetch the base values before touching the cluster: a template failure
    // must block the run with zero side effects.
    let base_source = config
        .template
        .base_values
        .as_deref()
        .ok_or(TemplateError::NotConfigured(ENV_BASE_VALUES))?;
    let base_values = template::fetch_base_values(base_source).await?;

    bundle::publish(helm, &entries, repo_root, &releases, config).await?;

    let deploy_output = deploy::deploy(helm, &base_values, &overlays, &releases, config).await?;

    Ok(RunReport {
        releases,
        entries,
        overlays,
        deploy_output: Some(deploy_output),
        dry_run: false,
    })
}
