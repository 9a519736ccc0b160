//! Environment lookup

use async_trait::async_trait;

use crate::domain::EnvironmentDescriptor;
use crate::error::EnvironmentError;

/// Resolves an environment identifier to its cluster connection descriptor
#[async_trait]
pub trait EnvironmentStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<EnvironmentDescriptor, EnvironmentError>;
}

/// Environments declared in the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfiguredEnvironments {
    environments: Vec<EnvironmentDescriptor>,
}

impl ConfiguredEnvironments {
    pub fn new(environments: Vec<EnvironmentDescriptor>) -> Self {
        Self { environments }
    }

    pub fn all(&self) -> &[EnvironmentDescriptor] {
        &self.environments
    }
}

#[async_trait]
impl EnvironmentStore for ConfiguredEnvironments {
    async fn get_by_id(&self, id: &str) -> Result<EnvironmentDescriptor, EnvironmentError> {
        let env = self
            .environments
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EnvironmentError::NotFound { id: id.to_string() })?;

        if env.namespace.is_empty() {
            return Err(EnvironmentError::Invalid {
                id: id.to_string(),
                reason: "namespace is empty".to_string(),
            });
        }

        Ok(env.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfiguredEnvironments {
        ConfiguredEnvironments::new(vec![
            EnvironmentDescriptor::new("dev", "dev").with_context("kind-dev"),
            EnvironmentDescriptor::new("broken", ""),
        ])
    }

    #[test]
    fn test_get_by_id() {
        let env = tokio_test::block_on(store().get_by_id("dev")).unwrap();
        assert_eq!(env.namespace, "dev");
        assert_eq!(env.context.as_deref(), Some("kind-dev"));
    }

    #[test]
    fn test_unknown_environment() {
        let err = tokio_test::block_on(store().get_by_id("qa")).unwrap_err();
        assert!(matches!(err, EnvironmentError::NotFound { .. }));
    }

    #[test]
    fn test_empty_namespace_is_invalid() {
        let err = tokio_test::block_on(store().get_by_id("broken")).unwrap_err();
        assert!(matches!(err, EnvironmentError::Invalid { .. }));
    }
}
