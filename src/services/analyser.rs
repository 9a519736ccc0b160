//! Dependency graph analyser
//!
//! Walks a chart's declared dependencies depth-first and accumulates a
//! node/link graph. Nodes are inserted before their children are visited,
//! so insertion order is pre-order and an already-present identity is never
//! expanded twice.

use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::domain::{node_name, Graph, Link, Node};
use crate::error::{AnalysisError, DependencyStoreError};
use crate::infrastructure::DependencyStore;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Accumulator threaded through one walk
struct Walk {
    graph: Graph,
    /// Identities from the root down to the chart being expanded
    path: Vec<String>,
}

/// Builds dependency graphs from a [`DependencyStore`]
pub struct Analyser<S> {
    store: S,
    options: AnalysisConfig,
}

impl<S: DependencyStore> Analyser<S> {
    pub fn new(store: S, options: AnalysisConfig) -> Self {
        Self { store, options }
    }

    /// Build the dependency graph rooted at `chart` at version `tag`
    pub async fn analyse(&self, chart: &str, tag: &str) -> Result<Graph, AnalysisError> {
        info!("Analysing dependencies of {}", node_name(chart, tag));

        let mut walk = Walk {
            graph: Graph::new(),
            path: Vec::new(),
        };
        self.visit(&mut walk, chart, tag, None).await?;

        info!(
            "Discovered {} charts and {} links",
            walk.graph.nodes.len(),
            walk.graph.links.len()
        );
        Ok(walk.graph)
    }

    fn visit<'a>(
        &'a self,
        walk: &'a mut Walk,
        chart: &'a str,
        tag: &'a str,
        parent: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), AnalysisError>> {
        Box::pin(async move {
            let id = node_name(chart, tag);
            let depth = walk.path.len();
            if depth > self.options.max_depth {
                return Err(AnalysisError::DepthExceeded {
                    node: id,
                    max_depth: self.options.max_depth,
                });
            }

            debug!("Visiting {} (depth {})", id, depth);
            walk.graph.push_node(Node::new(id.clone()));
            if let Some(parent) = parent {
                walk.graph.push_link(Link::new(parent, id.clone()));
            }

            let dependencies = match self.store.dependencies(chart, tag).await {
                Ok(deps) => deps,
                Err(DependencyStoreError::NotFound { .. }) => {
                    debug!("{} has no catalog entry, treating as leaf", id);
                    Vec::new()
                }
                Err(e) => return Err(AnalysisError::Store(e)),
            };

            walk.path.push(id.clone());
            for dependency in &dependencies {
                let dep_id = dependency.node_name();

                if !self.options.allow_cycles {
                    if let Some(start) = walk.path.iter().position(|p| *p == dep_id) {
                        let mut cycle = walk.path[start..].to_vec();
                        cycle.push(dep_id);
                        return Err(AnalysisError::DependencyCycle { path: cycle });
                    }
                }

                if walk.graph.contains(&dep_id) {
                    debug!("{} already discovered, skipping", dep_id);
                    continue;
                }

                self.visit(walk, &dependency.chart, &dependency.tag, Some(id.as_str()))
                    .await?;
            }
            walk.path.pop();

            Ok(())
        })
    }
}
