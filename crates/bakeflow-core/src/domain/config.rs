//! Declarative recipe documents.
//!
//! These types are the wire schema consumed by the
//! [`TemplateResolver`](crate::application::TemplateResolver): named,
//! reusable step blueprints ([`StepTemplate`]) plus per-recipe binding
//! documents ([`RecipeConfig`] / [`StepConfig`]). They are data, not domain
//! values — the resolver materializes them into
//! [`MultiStepRecipe`](crate::domain::MultiStepRecipe) instances.
//!
//! All field names follow the document convention (camelCase) rather than
//! Rust convention; serde renames handle the mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ingredient::{AmountRange, FlexibleIngredient, Ingredient};
use crate::domain::entities::recipe::Difficulty;
use crate::domain::entities::step::{ParamValue, StepType};
use crate::domain::error::DomainError;

/// A named, reusable blueprint for a recipe step.
///
/// `name` may embed `{param}` tokens resolved from the merged parameter map
/// at resolution time (a simple literal substitution, independent of the
/// three-pass instruction substitution).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub default_params: BTreeMap<String, ParamValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_params: Vec<String>,
}

/// A fixed scalar or a range object, as written in documents.
///
/// Untagged: a bare number deserializes to `Fixed`, an object with
/// `min`/`max` to `Range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountSpec {
    Fixed(f64),
    Range {
        min: f64,
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recommended: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
}

impl AmountSpec {
    /// Bind this spec to a resolved catalog [`Ingredient`].
    pub fn bind(&self, ingredient: Ingredient) -> Result<FlexibleIngredient, DomainError> {
        match self {
            Self::Fixed(amount) => FlexibleIngredient::fixed(ingredient, *amount),
            Self::Range {
                min,
                max,
                recommended,
                step,
            } => {
                let range = AmountRange::new(*min, *max, *recommended, *step)?;
                Ok(FlexibleIngredient::ranged(ingredient, range))
            }
        }
    }
}

/// One declared ingredient binding inside a step config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSpec {
    /// Catalog id to resolve (e.g., "flour").
    pub id: String,
    pub amount: AmountSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A declared ingredient group inside a step config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<IngredientSpec>,
}

/// Per-recipe use of a [`StepTemplate`]: overrides and bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    /// Name of the template to instantiate.
    pub template: String,
    /// Parameter overrides; merged over the template's `defaultParams`
    /// with these winning.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<IngredientSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredient_groups: Vec<GroupSpec>,
    /// Full replacement for the template's instructions (not a merge).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
}

/// Recipe metadata as written in documents (raw strings/numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_servings: f64,
    pub difficulty: Difficulty,
    pub baking_time: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A complete declarative recipe: metadata plus step configs in intended
/// order (the resolver assigns step orders from list position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeConfig {
    pub id: String,
    pub metadata: RecipeMetadata,
    pub steps: Vec<StepConfig>,
}
