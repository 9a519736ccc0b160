//! Chart dependency records

use serde::{Deserialize, Serialize};

use super::graph::node_name;

/// A dependency declared by a parent chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(rename = "name")]
    pub chart: String,
    #[serde(rename = "version")]
    pub tag: String,
}

impl Dependency {
    pub fn new(chart: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            tag: tag.into(),
        }
    }

    /// Graph identity of this dependency
    pub fn node_name(&self) -> String {
        node_name(&self.chart, &self.tag)
    }
}
