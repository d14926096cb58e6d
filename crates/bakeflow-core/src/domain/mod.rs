// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Bakeflow.
//!
//! Pure business logic: the recipe value model and its invariants. All I/O
//! (catalog lookups, document fetching) is handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: domain construction and scaling are synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable entities**: every transformation returns a new value
//! - **Rich domain model**: behavior lives in entities, not services

// Public API - what the world sees
pub mod config;
pub mod entities;
pub mod error;
pub mod steps;

// Re-exports for convenience
pub use config::{
    AmountSpec, GroupSpec, IngredientSpec, RecipeConfig, RecipeMetadata, StepConfig, StepTemplate,
};
pub use entities::{
    group::IngredientGroup,
    ingredient::{Amount, AmountRange, FlexibleIngredient, Ingredient},
    recipe::{
        Difficulty, MissingIngredient, MultiStepRecipe, MultiStepRecipeBuilder, RecipeOverview,
        StepCustomAmounts,
    },
    step::{CustomAmounts, ParamValue, RecipeStep, RecipeStepBuilder, StepParameters, StepType},
};
pub use error::{DomainError, ErrorCategory};
