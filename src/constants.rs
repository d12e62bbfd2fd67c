//! App-wide constants.
//!
//! Centralises the tool name, config paths, resource-name prefixes, and
//! environment variable names so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "hotpatch";

/// Crate version, used by the `version` subcommand.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.hotpatch.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".hotpatch.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "hotpatch";

/// Release-name prefix for the configuration bundle of a pull request.
pub const BUNDLE_RELEASE_PREFIX: &str = "preview-injection-";

/// Release-name prefix for the preview application of a pull request.
pub const APP_RELEASE_PREFIX: &str = "preview-";

/// Name prefix for per-file injection volumes.
pub const VOLUME_NAME_PREFIX: &str = "code-injection-";

/// Dotted values prefix under which bundle entries are published.
pub const BUNDLE_VALUES_PREFIX: &str = "configs";

/// Maximum length of a derived bundle key.
pub const KEY_MAX_LEN: usize = 30;


// ── Environment variable names ──────────────────────────────────────

pub const ENV_PR_NUMBER: &str = "HOTPATCH_PR_NUMBER";
pub const ENV_BASE_VALUES: &str = "HOTPATCH_BASE_VALUES";
pub const ENV_NAMESPACE: &str = "HOTPATCH_NAMESPACE";
pub const ENV_HELM_BIN: &str = "HOTPATCH_HELM_BIN";
pub const ENV_APP_ROOT: &str = "HOTPATCH_APP_ROOT";
