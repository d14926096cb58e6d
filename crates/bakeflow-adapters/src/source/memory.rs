//! In-memory recipe source backed by the built-in documents.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use bakeflow_core::application::ports::RecipeSource;
use bakeflow_core::domain::{RecipeConfig, StepTemplate};
use bakeflow_core::error::BakeflowResult;

use crate::builtin;

/// Recipe source serving a fixed in-memory document set.
///
/// Used as the default source when no recipe file is given, and in tests
/// where the fetch counter makes load behavior observable.
pub struct MemorySource {
    recipes: Vec<RecipeConfig>,
    templates: HashMap<String, StepTemplate>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(recipes: Vec<RecipeConfig>, templates: HashMap<String, StepTemplate>) -> Self {
        Self {
            recipes,
            templates,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Source seeded with the built-in templates and starter recipes.
    pub fn with_builtin() -> Self {
        Self::new(builtin::starter_recipes(), builtin::step_templates())
    }

    /// How many times `fetch_recipes` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[async_trait]
impl RecipeSource for MemorySource {
    async fn fetch_recipes(&self) -> BakeflowResult<Vec<RecipeConfig>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.recipes.clone())
    }

    async fn fetch_step_template(&self, name: &str) -> BakeflowResult<Option<StepTemplate>> {
        Ok(self.templates.get(name).cloned())
    }

    // Nothing cached beyond the seed data itself.
    async fn clear_cache(&self) {}
}
