//! Deployment status annotation
//!
//! Marks every node of a discovered graph with the live state of its
//! release in one environment:
//! - not deployed: undeployed status icon, shape and color untouched
//! - deployed on the expected version: green circle
//! - deployed on another version: triangle

use tracing::{debug, info, warn};

use crate::domain::{node_tag, release_name, Graph};
use crate::error::AnnotationError;
use crate::infrastructure::{ClusterInspector, EnvironmentStore};

/// Counts of node states after an annotation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub healthy: usize,
    pub version_mismatch: usize,
    pub undeployed: usize,
}

/// Annotates graphs with deployment status from a cluster
pub struct Annotator<E, C> {
    environments: E,
    inspector: C,
}

impl<E: EnvironmentStore, C: ClusterInspector> Annotator<E, C> {
    pub fn new(environments: E, inspector: C) -> Self {
        Self {
            environments,
            inspector,
        }
    }

    /// Annotate every node of `graph` with its status in `environment_id`
    ///
    /// A failed "is deployed" lookup counts as not deployed. A failed
    /// version check aborts the pass; nodes already visited keep their marks.
    pub async fn annotate(
        &self,
        graph: &mut Graph,
        environment_id: &str,
    ) -> Result<AnnotationSummary, AnnotationError> {
        let env = self.environments.get_by_id(environment_id).await?;
        info!(
            "Checking {} charts in environment {} (namespace {})",
            graph.nodes.len(),
            env.id,
            env.namespace
        );

        let mut summary = AnnotationSummary::default();

        for node in graph.nodes.iter_mut() {
            let release = release_name(&node.id, &env.namespace);

            let deployed = match self.inspector.release_deployed(&env, &release).await {
                Ok(deployed) => deployed,
                Err(e) => {
                    warn!("Could not read release {}: {}", release, e);
                    false
                }
            };

            if !deployed {
                debug!("{}: release {} not deployed", node.id, release);
                node.mark_undeployed();
                summary.undeployed += 1;
                continue;
            }

            let tag = node_tag(&node.id);
            let matched = self
                .inspector
                .pod_with_version(&env, &env.namespace, &release, tag)
                .await
                .map_err(|source| AnnotationError::Inspector {
                    node: node.id.clone(),
                    source,
                })?;

            if matched {
                node.mark_healthy();
                summary.healthy += 1;
            } else {
                debug!("{}: no running pod on version {}", node.id, tag);
                node.mark_version_mismatch();
                summary.version_mismatch += 1;
            }
        }

        info!(
            "{} healthy, {} version mismatch, {} undeployed",
            summary.healthy, summary.version_mismatch, summary.undeployed
        );
        Ok(summary)
    }
}
