//! Dependency graph domain types
//!
//! The serialized shape (`nodes`/`links`, `symbolType`) is what the
//! graph frontend consumes, so field names and order are part of the contract.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "blue";
pub const HEALTHY_COLOR: &str = "green";
pub const SYMBOL_CIRCLE: &str = "circle";
pub const SYMBOL_TRIANGLE: &str = "triangle";

/// Status icon shown on charts whose release is missing from the cluster
const UNDEPLOYED_ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><circle cx="12" cy="12" r="11" fill="#d32f2f"/><path d="M7 7l10 10M17 7L7 17" stroke="#ffffff" stroke-width="2.5" stroke-linecap="round"/></svg>"##;

/// Build the node identity for a chart at a given version tag
pub fn node_name(chart: &str, tag: &str) -> String {
    format!("{}:{}", chart, tag)
}

/// Data URI for the "broken/missing" status icon
pub fn undeployed_icon() -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(UNDEPLOYED_ICON_SVG)
    )
}

/// A chart at a specific version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub color: String,
    #[serde(rename = "symbolType")]
    pub symbol_type: String,
    pub svg: String,
}

impl Node {
    /// Create a node with default styling
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: DEFAULT_COLOR.to_string(),
            symbol_type: SYMBOL_CIRCLE.to_string(),
            svg: String::new(),
        }
    }

    pub fn mark_undeployed(&mut self) {
        self.svg = undeployed_icon();
    }

    pub fn mark_healthy(&mut self) {
        self.symbol_type = SYMBOL_CIRCLE.to_string();
        self.color = HEALTHY_COLOR.to_string();
    }

    pub fn mark_version_mismatch(&mut self) {
        self.symbol_type = SYMBOL_TRIANGLE.to_string();
    }

    pub fn is_undeployed(&self) -> bool {
        !self.svg.is_empty()
    }
}

/// Directed parent -> child edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Result of one analysis run
///
/// Nodes are kept in discovery order; identity uniqueness is enforced by
/// [`Graph::contains`] checks in the analyser, not by this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a node with this identity has been discovered
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Children of a node, in link insertion order
    pub fn children<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.links
            .iter()
            .filter(move |l| l.source == id)
            .map(|l| l.target.as_str())
    }
}
