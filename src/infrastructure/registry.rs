//! Container registry tag listing
//!
//! Talks to the Docker Hub compatible `v2/repositories` API and follows
//! pagination until every tag of an image has been fetched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::domain::ImageTag;
use crate::error::RegistryError;

/// Source of image tags
#[async_trait]
pub trait TagSource: Send + Sync {
    async fn fetch_tags(&self, image: &str) -> Result<Vec<ImageTag>, RegistryError>;
}

/// One page of the tags listing
#[derive(Debug, Clone, Deserialize)]
struct TagPage {
    next: Option<String>,
    #[serde(default)]
    results: Vec<TagEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TagEntry {
    name: String,
    last_updated: Option<DateTime<Utc>>,
}

/// Client for the registry tags API
pub struct RegistryClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl RegistryClient {
    /// Create a client from registry configuration
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// First page URL for an image's tags
    pub fn tags_url(&self, image: &str) -> Result<String, RegistryError> {
        let (namespace, repository) = split_image(image)?;
        Ok(format!(
            "{}/v2/repositories/{}/{}/tags?page_size={}",
            self.base_url, namespace, repository, self.page_size
        ))
    }

    async fn fetch_page(&self, url: &str) -> Result<TagPage, RegistryError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TagSource for RegistryClient {
    async fn fetch_tags(&self, image: &str) -> Result<Vec<ImageTag>, RegistryError> {
        let first = self.tags_url(image)?;
        let tags = collect_pages(first, |url| async move { self.fetch_page(&url).await }).await?;

        debug!("Fetched {} tags for {}", tags.len(), image);
        Ok(tags)
    }
}

/// Walk `next` links from `first`, collecting the tags of every page
///
/// An empty or missing `next` ends the walk. A `next` pointing at a page
/// already fetched ends it too, so a misbehaving registry cannot loop.
async fn collect_pages<F, Fut>(
    first: String,
    mut fetch: F,
) -> Result<Vec<ImageTag>, RegistryError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<TagPage, RegistryError>>,
{
    let mut fetched = HashSet::new();
    let mut next = Some(first);
    let mut tags = Vec::new();

    while let Some(url) = next {
        if !fetched.insert(url.clone()) {
            warn!("Registry repeated page {}, stopping pagination", url);
            break;
        }

        debug!("Fetching {}", url);
        let page = fetch(url).await?;
        tags.extend(
            page.results
                .into_iter()
                .map(|entry| ImageTag::new(entry.name, entry.last_updated)),
        );
        next = page.next.filter(|n| !n.is_empty());
    }

    Ok(tags)
}

/// Split an image reference into registry namespace and repository
///
/// Official images have no namespace and live under `library/`.
/// A `@digest` and a `:tag` on the last segment are ignored. References
/// naming another registry host (`ghcr.io/app`, `localhost:5000/app`) are
/// rejected.
pub fn split_image(image: &str) -> Result<(String, String), RegistryError> {
    let invalid = || RegistryError::InvalidImage {
        image: image.to_string(),
    };

    let name = image.split_once('@').map(|(n, _)| n).unwrap_or(image);
    let parts: Vec<&str> = name.split('/').collect();
    let (&last, rest) = parts.split_last().ok_or_else(invalid)?;
    let repo = last.split_once(':').map(|(r, _)| r).unwrap_or(last);

    if repo.is_empty() {
        return Err(invalid());
    }

    match rest {
        [] => Ok(("library".to_string(), repo.to_string())),
        [namespace] if is_namespace(namespace) => Ok((namespace.to_string(), repo.to_string())),
        _ => Err(invalid()),
    }
}

fn is_namespace(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "localhost"
        && !segment.contains(|c: char| c == ':' || c == '.')
}
