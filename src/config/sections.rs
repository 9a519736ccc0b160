//! Configuration sections with their defaults.

use serde::{Deserialize, Serialize};

/// Chart catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the YAML chart catalog (default: "charts.yaml")
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "charts.yaml".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Dependency walk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Skip back-edges instead of failing with a cycle error
    #[serde(default)]
    pub allow_cycles: bool,

    /// Maximum dependency depth below the root chart
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    64
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            allow_cycles: false,
            max_depth: default_max_depth(),
        }
    }
}

/// Kubernetes inspection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubernetesConfig {
    /// Pod label carrying the Helm release name
    #[serde(default = "default_instance_label")]
    pub instance_label: String,
}

fn default_instance_label() -> String {
    "app.kubernetes.io/instance".to_string()
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            instance_label: default_instance_label(),
        }
    }
}

/// Docker registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry API base URL (Docker Hub compatible)
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Tags requested per page (1-100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// HTTP request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_registry_url() -> String {
    "https://hub.docker.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
