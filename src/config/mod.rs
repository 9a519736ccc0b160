//! # chartgraph Configuration
//!
//! A single YAML file (`chartgraph.yaml` by default) describes where the chart
//! catalog lives, how the analyser treats cycles, how releases are located in
//! the cluster, and which environments (tenants) exist.
//!
//! ## Example
//!
//! ```yaml
//! catalog:
//!   path: charts.yaml
//! analysis:
//!   allow_cycles: false
//!   max_depth: 64
//! kubernetes:
//!   instance_label: app.kubernetes.io/instance
//! registry:
//!   url: https://hub.docker.com
//! environments:
//!   - id: dev
//!     name: Development
//!     group: platform
//!     namespace: dev
//!     context: kind-dev
//! ```

mod sections;

pub use sections::{AnalysisConfig, CatalogConfig, KubernetesConfig, RegistryConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::EnvironmentDescriptor;
use crate::error::ConfigError;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "chartgraph.yaml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "CHARTGRAPH_CONFIG";

/// Complete chartgraph configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chart catalog location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Graph walk settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Cluster inspection settings
    #[serde(default)]
    pub kubernetes: KubernetesConfig,

    /// Docker registry used for tag listing
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Known environments
    #[serde(default)]
    pub environments: Vec<EnvironmentDescriptor>,

    /// Directory of the loaded file, used to resolve relative paths
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve the config path: explicit flag, then env var, then default file
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Registry settings for commands that can run without a config file
    ///
    /// Only a missing implicit default file falls back to Docker Hub
    /// defaults; a path given by flag or env var must exist.
    pub fn registry_or_default(
        path: &Path,
        explicit: bool,
    ) -> Result<RegistryConfig, ConfigError> {
        if !explicit && !path.exists() {
            debug!("No config at {}, using registry defaults", path.display());
            return Ok(RegistryConfig::default());
        }
        Ok(Self::load(path)?.registry)
    }

    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("{}: {}", path.display(), e),
        })?;

        let mut config = Self::from_yaml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        debug!(
            "Loaded config from {} ({} environments)",
            path.display(),
            config.environments.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        config
            .validate()
            .map_err(|errors| ConfigError::Invalid { errors })?;

        Ok(config)
    }

    /// Catalog path, relative to the config file's directory when not absolute
    pub fn catalog_path(&self) -> PathBuf {
        let path = Path::new(&self.catalog.path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.catalog.path.is_empty() {
            errors.push("catalog.path cannot be empty".to_string());
        }
        if self.analysis.max_depth == 0 {
            errors.push("analysis.max_depth must be greater than 0".to_string());
        }
        if self.kubernetes.instance_label.is_empty() {
            errors.push("kubernetes.instance_label cannot be empty".to_string());
        }
        if !(1..=100).contains(&self.registry.page_size) {
            errors.push(format!(
                "registry.page_size must be between 1 and 100, got {}",
                self.registry.page_size
            ));
        }

        let mut seen = HashSet::new();
        for env in &self.environments {
            if env.id.is_empty() {
                errors.push("environment id cannot be empty".to_string());
            } else if !seen.insert(env.id.as_str()) {
                errors.push(format!("duplicate environment id '{}'", env.id));
            }
            if env.namespace.is_empty() {
                errors.push(format!("environment '{}' has no namespace", env.id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.catalog.path, "charts.yaml");
        assert!(!config.analysis.allow_cycles);
        assert_eq!(config.analysis.max_depth, 64);
        assert_eq!(config.kubernetes.instance_label, "app.kubernetes.io/instance");
        assert_eq!(config.registry.url, "https://hub.docker.com");
        assert!(config.environments.is_empty());
    }

    #[test]
    fn test_parse_environments() {
        let yaml = r#"
environments:
  - id: dev
    name: Development
    group: platform
    namespace: dev
    context: kind-dev
  - id: prod
    namespace: production
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.environments.len(), 2);
        assert_eq!(config.environments[0].context.as_deref(), Some("kind-dev"));
        assert_eq!(config.environments[1].namespace, "production");
        assert!(config.environments[1].context.is_none());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let yaml = r#"
analysis:
  max_depth: 0
registry:
  page_size: 500
environments:
  - id: dev
    namespace: dev
  - id: dev
    namespace: ""
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        let ConfigError::Invalid { errors } = err else {
            panic!("expected validation error");
        };
        assert!(errors.iter().any(|e| e.contains("max_depth")));
        assert!(errors.iter().any(|e| e.contains("page_size")));
        assert!(errors.iter().any(|e| e.contains("duplicate environment id 'dev'")));
        assert!(errors.iter().any(|e| e.contains("has no namespace")));
    }

    #[test]
    fn test_load_resolves_catalog_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chartgraph.yaml");
        std::fs::write(&path, "catalog:\n  path: catalog/charts.yaml\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog_path(), dir.path().join("catalog/charts.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/chartgraph.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_registry_defaults_when_implicit_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let registry = Config::registry_or_default(&path, false).unwrap();
        assert_eq!(registry.url, "https://hub.docker.com");
    }

    #[test]
    fn test_registry_requires_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = Config::registry_or_default(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_registry_read_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "registry:\n  url: https://mirror.example.com\n").unwrap();

        let registry = Config::registry_or_default(&path, false).unwrap();
        assert_eq!(registry.url, "https://mirror.example.com");
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        assert_eq!(
            Config::resolve_path(Some("custom.yaml")),
            PathBuf::from("custom.yaml")
        );
    }
}
