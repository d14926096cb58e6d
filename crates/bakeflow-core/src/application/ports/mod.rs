//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `bakeflow-adapters` crate provides implementations.

use async_trait::async_trait;

use crate::domain::{Ingredient, RecipeConfig, StepTemplate};
use crate::error::BakeflowResult;

/// Port for ingredient catalog lookups.
///
/// Implemented by:
/// - `bakeflow_adapters::catalog::StaticCatalog` (starter + custom entries)
///
/// The catalog is assumed pre-populated at process start and read-only
/// thereafter, so lookups are synchronous.
pub trait IngredientCatalog: Send + Sync {
    /// Look up an ingredient by its stable id.
    fn get(&self, id: &str) -> Option<Ingredient>;

    /// All known ingredient ids (diagnostics and listings).
    fn ids(&self) -> Vec<String>;
}

/// Port for the declarative config/template source.
///
/// Implemented by:
/// - `bakeflow_adapters::source::MemorySource` (builtin documents, tests)
/// - `bakeflow_adapters::source::JsonFileSource` (JSON documents on disk)
///
/// Fetches are asynchronous I/O-bound operations; they are the only
/// suspension points in this core.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch every recipe config document, in source order.
    async fn fetch_recipes(&self) -> BakeflowResult<Vec<RecipeConfig>>;

    /// Fetch a step template by name; `None` if the name is unknown.
    async fn fetch_step_template(&self, name: &str) -> BakeflowResult<Option<StepTemplate>>;

    /// Drop any cached documents so the next fetch re-reads the source.
    async fn clear_cache(&self);
}
