//! Environment (tenant) descriptor

use serde::{Deserialize, Serialize};

/// A Kubernetes cluster/namespace target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
    /// Identifier used on the command line
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Owning group/team
    #[serde(default)]
    pub group: String,

    /// Namespace releases are installed into
    pub namespace: String,

    /// Kubeconfig context holding the cluster credentials (default: current context)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl EnvironmentDescriptor {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            group: String::new(),
            namespace: namespace.into(),
            context: None,
        }
    }

    /// Builder: set kubeconfig context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
