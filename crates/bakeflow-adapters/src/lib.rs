//! Infrastructure adapters for Bakeflow.
//!
//! This crate implements the ports defined in `bakeflow-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin;
pub mod catalog;
pub mod source;

// Re-export commonly used adapters
pub use catalog::StaticCatalog;
pub use source::{JsonFileSource, MemorySource};
