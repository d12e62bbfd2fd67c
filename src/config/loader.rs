//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.hotpatch.toml` in repo root
//! 4. `~/.config/hotpatch/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub charts: ChartsConfig,
    pub cluster: ClusterConfig,
    pub app: AppConfig,
    pub template: TemplateConfig,
}

/// Chart references for the two upgrade operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Chart for the per-PR configuration bundle.
    pub bundle: String,
    /// Chart for the preview application itself.
    pub app: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            bundle: "charts/injection-bundle".to_string(),
            app: "charts/preview-app".to_string(),
        }
    }
}

/// Cluster/package-manager settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Namespace shared by all preview releases; isolation comes entirely
    /// from PR-qualified release names, not from separate namespaces.
    pub namespace: Option<String>,
    /// Helm binary to invoke.
    pub helm_bin: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            helm_bin: "helm".to_string(),
        }
    }
}

/// Target application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Container path the source tree lives under; injected files land at
    /// `root/<original relative path>`.
    pub root: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: "/app".to_string(),
        }
    }
}

/// Base values template settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Where the base values document comes from: an `http(s)://` URL or a
    /// local file path.
    pub base_values: Option<String>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, repo-local config, then applies
    /// environment variable overrides.
    pub fn load(repo_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: repo-local config
        if let Some(root) = repo_root {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        let default_charts = ChartsConfig::default();
        if other.charts.bundle != default_charts.bundle {
            self.charts.bundle = other.charts.bundle;
        }
        if other.charts.app != default_charts.app {
            self.charts.app = other.charts.app;
        }

        if other.cluster.namespace.is_some() {
            self.cluster.namespace = other.cluster.namespace;
        }
        if other.cluster.helm_bin != ClusterConfig::default().helm_bin {
            self.cluster.helm_bin = other.cluster.helm_bin;
        }

        if other.app.root != AppConfig::default().root {
            self.app.root = other.app.root;
        }

        if other.template.base_values.is_some() {
            self.template.base_values = other.template.base_values;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(constants::ENV_NAMESPACE) {
            self.cluster.namespace = Some(val);
        }
        if let Ok(val) = env.var(constants::ENV_HELM_BIN) {
            self.cluster.helm_bin = val;
        }
        if let Ok(val) = env.var(constants::ENV_APP_ROOT) {
            self.app.root = val;
        }
        if let Ok(val) = env.var(constants::ENV_BASE_VALUES) {
            self.template.base_values = Some(val);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.cluster.helm_bin, "helm");
        assert_eq!(config.app.root, "/app");
        assert!(config.cluster.namespace.is_none());
        assert!(config.template.base_values.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[charts]
bundle = "oci://registry.example.com/charts/bundle"
app = "oci://registry.example.com/charts/app"

[cluster]
namespace = "previews"

[app]
root = "/srv/app"

[template]
base_values = "https://config.example.com/preview-values.yaml"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.charts.bundle, "oci://registry.example.com/charts/bundle");
        assert_eq!(config.cluster.namespace.as_deref(), Some("previews"));
        assert_eq!(config.app.root, "/srv/app");
        assert_eq!(
            config.template.base_values.as_deref(),
            Some("https://config.example.com/preview-values.yaml")
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[cluster]\nnamespace = \"ci\"\n").unwrap();
        assert_eq!(config.cluster.namespace.as_deref(), Some("ci"));
        assert_eq!(config.cluster.helm_bin, "helm");
        assert_eq!(config.app.root, "/app");
    }

    #[test]
    fn local_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILENAME),
            "[app]\nroot = \"/galaxy/server\"\n",
        )
        .unwrap();

        let env = Env::mock(Vec::<(&str, &str)>::new());
        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.app.root, "/galaxy/server");
    }

    #[test]
    fn env_overrides_local_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILENAME),
            "[app]\nroot = \"/from-file\"\n",
        )
        .unwrap();

        let env = Env::mock([(constants::ENV_APP_ROOT, "/from-env")]);
        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.app.root, "/from-env");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(constants::CONFIG_FILENAME), "not = [valid").unwrap();

        let env = Env::mock(Vec::<(&str, &str)>::new());
        let err = Config::load(Some(dir.path()), &env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFile { .. }), "got: {err}");
    }
}
