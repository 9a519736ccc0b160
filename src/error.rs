//! Centralized error types for chartgraph
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Top-level error type for chartgraph operations
#[derive(Error, Debug)]
pub enum ChartGraphError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Dependency store errors
#[derive(Error, Debug)]
pub enum DependencyStoreError {
    /// The chart is unknown to the store. The analyser treats this as "no dependencies".
    #[error("Chart {chart}:{tag} not found in dependency store")]
    NotFound { chart: String, tag: String },

    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Dependency store backend failed: {0}")]
    Backend(String),
}

/// Environment lookup errors
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Environment {id} not found")]
    NotFound { id: String },

    #[error("Environment {id} is invalid: {reason}")]
    Invalid { id: String, reason: String },
}

/// Cluster inspection errors
#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("Failed to connect to cluster for environment {environment}: {message}")]
    Connection {
        environment: String,
        message: String,
    },

    #[error("Kubernetes API request failed: {0}")]
    Api(#[from] kube::Error),
}

/// Graph discovery errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Dependency lookup failed: {0}")]
    Store(#[source] DependencyStoreError),

    #[error("Dependency cycle detected: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },

    #[error("Dependency depth exceeded {max_depth} at {node}")]
    DepthExceeded { node: String, max_depth: usize },
}

/// Deployment status annotation errors
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("Version check failed for {node}: {source}")]
    Inspector {
        node: String,
        #[source]
        source: InspectorError,
    },
}

/// Container registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid image reference: {image}. Expected: [namespace/]repository")]
    InvalidImage { image: String },

    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry returned status {status} for {url}")]
    Status { status: u16, url: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration:\n  {}", errors.join("\n  "))]
    Invalid { errors: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_display() {
        let err = AnalysisError::DependencyCycle {
            path: vec!["a:1".into(), "b:1".into(), "a:1".into()],
        };
        assert_eq!(
            err.to_string(),
            "Dependency cycle detected: a:1 -> b:1 -> a:1"
        );
    }

    #[test]
    fn test_error_conversion() {
        let env_err = EnvironmentError::NotFound { id: "dev".into() };
        let annotation_err: AnnotationError = env_err.into();
        let top: ChartGraphError = annotation_err.into();
        assert!(matches!(top, ChartGraphError::Annotation(_)));
        assert!(top.to_string().contains("Environment dev not found"));
    }

    #[test]
    fn test_config_invalid_lists_every_problem() {
        let err = ConfigError::Invalid {
            errors: vec!["first".into(), "second".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("first"));
        assert!(msg.contains("second"));
    }
}
