//! Release naming rules
//!
//! Maps chart graph identities onto the Helm release names used in a tenant
//! namespace, and extracts version tags from node ids and container images.

/// Derive the release name for a node in a namespace
///
/// `"stable/redis:6.2.1"` in `dev` becomes `"redis-dev"`: the repository
/// prefix (up to the first `/`) and the version suffix (from the last `:`)
/// are dropped, then the namespace is appended.
pub fn release_name(node_id: &str, namespace: &str) -> String {
    let without_repo = node_id
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or(node_id);
    let chart = without_repo
        .rsplit_once(':')
        .map(|(name, _)| name)
        .unwrap_or(without_repo);
    format!("{}-{}", chart, namespace)
}

/// Version tag of a node id (text after the last `:`)
pub fn node_tag(node_id: &str) -> &str {
    node_id.rsplit_once(':').map(|(_, t)| t).unwrap_or("")
}

/// Tag of a container image reference
///
/// Returns `None` for untagged images; a `:` belonging to a registry port
/// (`host:5000/app`) is not a tag separator. Digests are stripped.
pub fn image_tag(image: &str) -> Option<&str> {
    let image = image.split_once('@').map(|(name, _)| name).unwrap_or(image);
    let last_segment = image.rsplit('/').next().unwrap_or(image);
    last_segment.rsplit_once(':').map(|(_, tag)| tag)
}
