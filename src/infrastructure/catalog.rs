//! Chart dependency catalogs
//!
//! The analyser only sees the [`DependencyStore`] trait. Two stores are
//! provided: an in-memory map, and a YAML catalog file loaded into one.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::domain::Dependency;
use crate::error::DependencyStoreError;

/// Resolves a chart at a version to its declared dependencies
#[async_trait]
pub trait DependencyStore: Send + Sync {
    /// Direct dependencies of `chart` at `tag`, in declaration order
    ///
    /// Returns [`DependencyStoreError::NotFound`] for unknown charts.
    async fn dependencies(
        &self,
        chart: &str,
        tag: &str,
    ) -> Result<Vec<Dependency>, DependencyStoreError>;
}

/// Dependency store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    charts: HashMap<(String, String), Vec<Dependency>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a chart and its dependencies
    pub fn with_chart(
        mut self,
        chart: impl Into<String>,
        tag: impl Into<String>,
        dependencies: Vec<Dependency>,
    ) -> Self {
        self.insert(chart, tag, dependencies);
        self
    }

    /// Register a chart, returning the dependencies it replaced, if any
    pub fn insert(
        &mut self,
        chart: impl Into<String>,
        tag: impl Into<String>,
        dependencies: Vec<Dependency>,
    ) -> Option<Vec<Dependency>> {
        self.charts.insert((chart.into(), tag.into()), dependencies)
    }

    pub(crate) fn len(&self) -> usize {
        self.charts.len()
    }
}

#[async_trait]
impl DependencyStore for InMemoryCatalog {
    async fn dependencies(
        &self,
        chart: &str,
        tag: &str,
    ) -> Result<Vec<Dependency>, DependencyStoreError> {
        self.charts
            .get(&(chart.to_string(), tag.to_string()))
            .cloned()
            .ok_or_else(|| DependencyStoreError::NotFound {
                chart: chart.to_string(),
                tag: tag.to_string(),
            })
    }
}

/// Raw catalog file structure
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    charts: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    version: String,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

/// Catalog loaded from a YAML file
pub struct CatalogFile;

impl CatalogFile {
    /// Read a catalog file into an in-memory store
    pub fn load(path: &Path) -> Result<InMemoryCatalog, DependencyStoreError> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| DependencyStoreError::Io {
            path: shown.clone(),
            source,
        })?;

        let catalog = Self::parse(&content).map_err(|message| DependencyStoreError::Parse {
            path: shown.clone(),
            message,
        })?;

        debug!("Loaded {} charts from {}", catalog.len(), shown);
        Ok(catalog)
    }

    /// Parse catalog YAML
    ///
    /// A chart listed twice at the same version is rejected.
    pub fn parse(content: &str) -> Result<InMemoryCatalog, String> {
        let document: CatalogDocument =
            serde_yaml::from_str(content).map_err(|e| e.to_string())?;

        let mut catalog = InMemoryCatalog::new();
        for entry in document.charts {
            let id = format!("{}:{}", entry.name, entry.version);
            if catalog
                .insert(entry.name, entry.version, entry.dependencies)
                .is_some()
            {
                return Err(format!("chart {} is listed more than once", id));
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
charts:
  - name: stable/api
    version: "1.2.0"
    dependencies:
      - name: stable/redis
        version: "6.2.1"
      - name: stable/postgres
        version: "14.1"
  - name: stable/redis
    version: "6.2.1"
"#;

    #[tokio::test]
    async fn test_catalog_preserves_dependency_order() {
        let catalog = CatalogFile::parse(CATALOG).unwrap();
        let deps = catalog.dependencies("stable/api", "1.2.0").await.unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("stable/redis", "6.2.1"),
                Dependency::new("stable/postgres", "14.1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_chart_without_dependencies() {
        let catalog = CatalogFile::parse(CATALOG).unwrap();
        let deps = catalog.dependencies("stable/redis", "6.2.1").await.unwrap();
        assert!(deps.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_chart_is_not_found() {
        let catalog = CatalogFile::parse(CATALOG).unwrap();
        let err = catalog
            .dependencies("stable/postgres", "14.1")
            .await
            .unwrap_err();
        assert!(matches!(err, DependencyStoreError::NotFound { .. }));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(CatalogFile::parse("charts: [").is_err());
    }

    #[test]
    fn test_duplicate_chart_is_rejected() {
        let doubled = format!(
            "{}  - name: stable/redis\n    version: \"6.2.1\"\n    dependencies:\n      - name: stable/sentinel\n        version: \"1.0\"\n",
            CATALOG
        );
        let err = CatalogFile::parse(&doubled).unwrap_err();
        assert!(err.contains("stable/redis:6.2.1"));
    }

    #[test]
    fn test_same_chart_at_two_versions_is_allowed() {
        let two_versions = format!(
            "{}  - name: stable/redis\n    version: \"7.0.0\"\n",
            CATALOG
        );
        let catalog = CatalogFile::parse(&two_versions).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_insert_reports_replaced_entry() {
        let mut catalog = InMemoryCatalog::new();
        assert!(catalog.insert("a", "1", vec![]).is_none());
        let replaced = catalog.insert("a", "1", vec![Dependency::new("b", "2")]);
        assert_eq!(replaced, Some(vec![]));
    }

    #[test]
    fn test_load_duplicate_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.yaml");
        std::fs::write(&path, "charts:\n  - name: a\n    version: \"1\"\n  - name: a\n    version: \"1\"\n").unwrap();
        let err = CatalogFile::load(&path).unwrap_err();
        assert!(matches!(err, DependencyStoreError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CatalogFile::load(Path::new("/nonexistent/charts.yaml")).unwrap_err();
        assert!(matches!(err, DependencyStoreError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.yaml");
        std::fs::write(&path, CATALOG).unwrap();
        let catalog = CatalogFile::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
