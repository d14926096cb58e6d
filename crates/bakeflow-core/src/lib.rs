//! Bakeflow Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Bakeflow
//! recipe engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          bakeflow-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (TemplateResolver)             │
//! │   Loads declarative docs, builds        │
//! │   MultiStepRecipe instances             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: IngredientCatalog, Source)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    bakeflow-adapters (Infrastructure)   │
//! │  (StaticCatalog, MemorySource, JSON)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (FlexibleIngredient, RecipeStep,        │
//! │  MultiStepRecipe, step factories)       │
//! │        No I/O, fully synchronous        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bakeflow_core::application::TemplateResolver;
//!
//! # async fn demo(catalog: Arc<dyn bakeflow_core::application::ports::IngredientCatalog>,
//! #               source: Arc<dyn bakeflow_core::application::ports::RecipeSource>,
//! #               fallback: Arc<dyn bakeflow_core::application::ports::IngredientCatalog>) {
//! // 1. Build the resolver with injected adapters
//! let resolver = TemplateResolver::new(source, catalog, fallback);
//!
//! // 2. Resolve declarative recipe documents into domain values
//! let recipes = resolver.all_recipes().await.unwrap();
//!
//! // 3. Work with the immutable domain model
//! let doubled = recipes[0].scale_to_servings(8.0).unwrap();
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        TemplateResolver,
        ports::{IngredientCatalog, RecipeSource},
    };
    pub use crate::domain::{
        AmountRange, Difficulty, FlexibleIngredient, Ingredient, IngredientGroup,
        MultiStepRecipe, RecipeConfig, RecipeStep, StepConfig, StepParameters, StepTemplate,
        StepType,
    };
    pub use crate::error::{BakeflowError, BakeflowResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
