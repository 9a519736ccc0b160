//! Docker image tag listing with a date cache
//!
//! The cache is owned by the caller and passed in, so its lifetime is
//! whatever the caller chooses (one command, or the whole process).

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{sort_newest_first, ImageTag};
use crate::error::RegistryError;
use crate::infrastructure::TagSource;

/// Last-updated dates keyed by `image:tag`
#[derive(Debug, Default)]
pub struct TagDateCache {
    dates: DashMap<String, DateTime<Utc>>,
}

impl TagDateCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(image: &str, tag: &str) -> String {
        format!("{}:{}", image, tag)
    }

    pub fn get(&self, image: &str, tag: &str) -> Option<DateTime<Utc>> {
        self.dates.get(&Self::key(image, tag)).map(|entry| *entry)
    }

    pub fn insert(&self, image: &str, tag: &str, date: DateTime<Utc>) {
        self.dates.insert(Self::key(image, tag), date);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Lists image tags newest first
pub struct TagService<'a, T> {
    source: T,
    cache: &'a TagDateCache,
}

impl<'a, T: TagSource> TagService<'a, T> {
    pub fn new(source: T, cache: &'a TagDateCache) -> Self {
        Self { source, cache }
    }

    /// Fetch all tags of `image`, dated from the cache, newest first
    pub async fn list_tags(&self, image: &str) -> Result<Vec<ImageTag>, RegistryError> {
        let mut tags = self.source.fetch_tags(image).await?;

        for tag in tags.iter_mut() {
            match tag.last_updated {
                Some(date) => self.cache.insert(image, &tag.name, date),
                None => tag.last_updated = self.cache.get(image, &tag.name),
            }
        }

        sort_newest_first(&mut tags);
        debug!(
            "Listed {} tags for {} ({} cached dates)",
            tags.len(),
            image,
            self.cache.len()
        );
        Ok(tags)
    }
}
