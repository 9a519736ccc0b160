//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - Chart catalogs (dependency lookup)
//! - Environment definitions
//! - Kubernetes API (release and pod state)
//! - Container registry (tag listing)

pub mod catalog;
pub mod cluster;
pub mod environments;
pub mod registry;

// Re-export commonly used types
pub use catalog::{CatalogFile, DependencyStore, InMemoryCatalog};
pub use cluster::{ClusterInspector, KubeInspector};
pub use environments::{ConfiguredEnvironments, EnvironmentStore};
pub use registry::{RegistryClient, TagSource};
