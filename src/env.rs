//! Environment variable abstraction and CI context detection.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, eliminating the need for
//! `unsafe` calls to [`std::env::set_var`] / [`std::env::remove_var`].
//!
//! The pull-request number that scopes every release name is detected here:
//! an explicit `HOTPATCH_PR_NUMBER` wins, then the CI variables the common
//! forges export.

use std::collections::HashMap;

use crate::constants::ENV_PR_NUMBER;

/// Environment variable reader.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Returns `true` if the variable is present.
    pub fn is_set(&self, name: &str) -> bool {
        self.var(name).is_ok()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

/// Detect the pull-request number from the CI environment.
///
/// Tries, in order:
/// 1. `HOTPATCH_PR_NUMBER` (explicit override)
/// 2. `GITHUB_REF` in the `refs/pull/<n>/merge` form
/// 3. `CI_MERGE_REQUEST_IID`, `BITBUCKET_PR_ID`, `PULL_REQUEST_NUMBER`
///
/// Returns `None` when no variable yields a parseable number.
pub fn detect_pr_number(env: &Env) -> Option<u64> {
    if let Ok(val) = env.var(ENV_PR_NUMBER) {
        if let Ok(n) = val.trim().parse() {
            return Some(n);
        }
    }

    if let Ok(gh_ref) = env.var("GITHUB_REF") {
        if let Some(n) = parse_github_ref(&gh_ref) {
            return Some(n);
        }
    }

    for var in &["CI_MERGE_REQUEST_IID", "BITBUCKET_PR_ID", "PULL_REQUEST_NUMBER"] {
        if let Ok(val) = env.var(var) {
            if let Ok(n) = val.trim().parse() {
                return Some(n);
            }
        }
    }

    None
}

/// Extract the PR number from a `refs/pull/<n>/merge` or `refs/pull/<n>/head` ref.
fn parse_github_ref(gh_ref: &str) -> Option<u64> {
    let rest = gh_ref.strip_prefix("refs/pull/")?;
    let (number, _) = rest.split_once('/')?;
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_ok());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("FOO", "bar")]);
        assert_eq!(env.var("FOO").unwrap(), "bar");
        assert!(env.var("MISSING").is_err());
    }

    #[test]
    fn explicit_pr_number_wins() {
        let env = Env::mock([
            (ENV_PR_NUMBER, "17"),
            ("GITHUB_REF", "refs/pull/99/merge"),
        ]);
        assert_eq!(detect_pr_number(&env), Some(17));
    }

    #[test]
    fn pr_number_from_github_ref() {
        let env = Env::mock([("GITHUB_REF", "refs/pull/4242/merge")]);
        assert_eq!(detect_pr_number(&env), Some(4242));
    }

    #[test]
    fn pr_number_from_github_ref_head_form() {
        let env = Env::mock([("GITHUB_REF", "refs/pull/7/head")]);
        assert_eq!(detect_pr_number(&env), Some(7));
    }

    #[test]
    fn branch_ref_yields_nothing() {
        let env = Env::mock([("GITHUB_REF", "refs/heads/main")]);
        assert_eq!(detect_pr_number(&env), None);
    }

    #[test]
    fn gitlab_fallback() {
        let env = Env::mock([("CI_MERGE_REQUEST_IID", "314")]);
        assert_eq!(detect_pr_number(&env), Some(314));
    }

    #[test]
    fn unparseable_values_are_skipped() {
        let env = Env::mock([
            (ENV_PR_NUMBER, "not-a-number"),
            ("BITBUCKET_PR_ID", "12"),
        ]);
        assert_eq!(detect_pr_number(&env), Some(12));
    }

    #[test]
    fn empty_env_yields_none() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert_eq!(detect_pr_number(&env), None);
    }
}
