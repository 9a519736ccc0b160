//! Live cluster inspection
//!
//! Answers two questions about a Helm release in an environment: is it
//! deployed, and is any running pod on the expected version tag.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Secret};
use kube::{
    api::{Api, ListParams},
    config::KubeConfigOptions,
    Client, Config,
};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{image_tag, EnvironmentDescriptor};
use crate::error::InspectorError;

/// Reports release and pod state from a cluster
#[async_trait]
pub trait ClusterInspector: Send + Sync {
    /// Whether a release with this name is currently deployed in the environment
    async fn release_deployed(
        &self,
        env: &EnvironmentDescriptor,
        release: &str,
    ) -> Result<bool, InspectorError>;

    /// Whether any running pod of the release has an image with this tag
    async fn pod_with_version(
        &self,
        env: &EnvironmentDescriptor,
        namespace: &str,
        release: &str,
        tag: &str,
    ) -> Result<bool, InspectorError>;
}

/// Inspector backed by the Kubernetes API
///
/// Clients are built lazily per environment and reused for the lifetime
/// of the inspector.
pub struct KubeInspector {
    instance_label: String,
    clients: Mutex<HashMap<String, Client>>,
}

impl KubeInspector {
    pub fn new(instance_label: impl Into<String>) -> Self {
        Self {
            instance_label: instance_label.into(),
            clients: Mutex::new(HashMap::new()),
        }
    }

    async fn client(&self, env: &EnvironmentDescriptor) -> Result<Client, InspectorError> {
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(&env.id) {
            return Ok(client.clone());
        }

        let client = create_client(env).await?;
        clients.insert(env.id.clone(), client.clone());
        Ok(client)
    }
}

/// Create a Kubernetes client for an environment
///
/// Uses the environment's kubeconfig context when set, otherwise infers
/// the configuration (in-cluster or current context).
async fn create_client(env: &EnvironmentDescriptor) -> Result<Client, InspectorError> {
    let connection_error = |message: String| InspectorError::Connection {
        environment: env.id.clone(),
        message,
    };

    let config = match &env.context {
        Some(context) => {
            debug!("Using kubeconfig context {} for {}", context, env.id);
            let options = KubeConfigOptions {
                context: Some(context.clone()),
                ..Default::default()
            };
            Config::from_kubeconfig(&options)
                .await
                .map_err(|e| connection_error(e.to_string()))?
        }
        None => Config::infer()
            .await
            .map_err(|e| connection_error(e.to_string()))?,
    };

    Client::try_from(config).map_err(|e| connection_error(e.to_string()))
}

/// Label selector matching Helm 3 storage secrets of a deployed release
pub fn helm_release_selector(release: &str) -> String {
    format!("owner=helm,name={},status=deployed", release)
}

/// Whether a pod is running and any of its containers uses `tag`
pub fn pod_runs_tag(pod: &Pod, tag: &str) -> bool {
    let running = pod
        .status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .map(|phase| phase == "Running")
        .unwrap_or(false);

    running
        && pod
            .spec
            .as_ref()
            .map(|spec| {
                spec.containers
                    .iter()
                    .filter_map(|c| c.image.as_deref())
                    .any(|image| image_tag(image) == Some(tag))
            })
            .unwrap_or(false)
}

#[async_trait]
impl ClusterInspector for KubeInspector {
    async fn release_deployed(
        &self,
        env: &EnvironmentDescriptor,
        release: &str,
    ) -> Result<bool, InspectorError> {
        let client = self.client(env).await?;
        let secrets: Api<Secret> = Api::namespaced(client, &env.namespace);

        let lp = ListParams::default().labels(&helm_release_selector(release));
        let list = secrets.list(&lp).await?;

        debug!(
            "Release {} in {}: {} deployed revision(s)",
            release,
            env.namespace,
            list.items.len()
        );
        Ok(!list.items.is_empty())
    }

    async fn pod_with_version(
        &self,
        env: &EnvironmentDescriptor,
        namespace: &str,
        release: &str,
        tag: &str,
    ) -> Result<bool, InspectorError> {
        let client = self.client(env).await?;
        let pods: Api<Pod> = Api::namespaced(client, namespace);

        let lp = ListParams::default().labels(&format!("{}={}", self.instance_label, release));
        let list = pods.list(&lp).await?;

        let matched = list.items.iter().any(|pod| pod_runs_tag(pod, tag));
        debug!(
            "Release {}: {} pod(s), version {} matched: {}",
            release,
            list.items.len(),
            tag,
            matched
        );
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Container, PodSpec, PodStatus};

    fn pod(phase: &str, images: &[&str]) -> Pod {
        Pod {
            spec: Some(PodSpec {
                containers: images
                    .iter()
                    .enumerate()
                    .map(|(i, image)| Container {
                        name: format!("c{}", i),
                        image: Some(image.to_string()),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some(phase.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_helm_release_selector() {
        assert_eq!(
            helm_release_selector("redis-dev"),
            "owner=helm,name=redis-dev,status=deployed"
        );
    }

    #[test]
    fn test_running_pod_with_matching_tag() {
        assert!(pod_runs_tag(&pod("Running", &["ghcr.io/org/redis:6.2.1"]), "6.2.1"));
    }

    #[test]
    fn test_sidecar_image_can_match() {
        let p = pod("Running", &["envoy:1.29", "ghcr.io/org/api:1.2.0"]);
        assert!(pod_runs_tag(&p, "1.2.0"));
    }

    #[test]
    fn test_pending_pod_does_not_match() {
        assert!(!pod_runs_tag(&pod("Pending", &["redis:6.2.1"]), "6.2.1"));
    }

    #[test]
    fn test_tag_must_match_exactly() {
        assert!(!pod_runs_tag(&pod("Running", &["redis:6.2.10"]), "6.2.1"));
        assert!(!pod_runs_tag(&pod("Running", &["registry:6/redis"]), "6"));
    }

    #[test]
    fn test_pod_without_status() {
        let mut p = pod("Running", &["redis:6.2.1"]);
        p.status = None;
        assert!(!pod_runs_tag(&p, "6.2.1"));
    }
}
