//! Services layer - orchestration logic
//!
//! This module coordinates between domain logic and infrastructure.
//! Services use infrastructure adapters to perform I/O operations.

pub mod analyser;
pub mod annotator;
pub mod tag_service;

// Re-export commonly used types
pub use analyser::Analyser;
pub use annotator::{AnnotationSummary, Annotator};
pub use tag_service::{TagDateCache, TagService};
