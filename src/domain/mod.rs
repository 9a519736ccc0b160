//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod chart;
pub mod environment;
pub mod graph;
pub mod release;
pub mod tag;

// Re-export commonly used types
pub use environment::EnvironmentDescriptor;
pub use graph::{node_name, Graph, Link, Node};
pub use release::{image_tag, node_tag, release_name};
pub use chart::Dependency;
pub use tag::{sort_newest_first, ImageTag};
