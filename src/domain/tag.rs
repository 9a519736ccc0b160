//! Docker image tag types and ordering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A tag of a container image with its last push date, when known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTag {
    pub name: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ImageTag {
    pub fn new(name: impl Into<String>, last_updated: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            last_updated,
        }
    }
}

/// Sort tags newest first; undated tags go last, ties broken by name
pub fn sort_newest_first(tags: &mut [ImageTag]) {
    tags.sort_by(|a, b| match (a.last_updated, b.last_updated) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_sort_newest_first() {
        let mut tags = vec![
            ImageTag::new("1.0", at(1)),
            ImageTag::new("dev", None),
            ImageTag::new("1.2", at(9)),
            ImageTag::new("1.1", at(5)),
            ImageTag::new("alpha", None),
        ];

        sort_newest_first(&mut tags);

        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["1.2", "1.1", "1.0", "alpha", "dev"]);
    }

    #[test]
    fn test_sort_ties_by_name() {
        let mut tags = vec![ImageTag::new("b", at(2)), ImageTag::new("a", at(2))];
        sort_newest_first(&mut tags);
        assert_eq!(tags[0].name, "a");
    }
}
