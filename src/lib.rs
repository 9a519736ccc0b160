//! chartgraph: Helm chart dependency graphs with live deployment status
//!
//! The analyser walks a chart's declared dependencies into a node/link
//! [`domain::Graph`]; the annotator then marks each node with the state of
//! its release in a Kubernetes environment.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;
