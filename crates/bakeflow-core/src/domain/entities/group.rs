//! Named ingredient bundles.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ingredient::FlexibleIngredient;
use crate::domain::error::DomainError;

/// A named, ordered bag of [`FlexibleIngredient`]s.
///
/// Groups exist for bulk instruction substitution: a single `{group:dry}`
/// token expands to the whole comma-joined member list. The name must be
/// unique within the owning step (enforced by `RecipeStep`, which owns the
/// namespace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientGroup {
    name: String,
    description: Option<String>,
    ingredients: Vec<FlexibleIngredient>,
}

impl IngredientGroup {
    pub fn new(
        name: impl Into<String>,
        ingredients: Vec<FlexibleIngredient>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField {
                field: "group name",
            });
        }
        Ok(Self {
            name,
            description: None,
            ingredients,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn ingredients(&self) -> &[FlexibleIngredient] {
        &self.ingredients
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Return a new group with every member scaled by `factor`.
    pub fn scale(&self, factor: f64) -> Result<Self, DomainError> {
        let ingredients = self
            .ingredients
            .iter()
            .map(|fi| fi.scale(factor))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: self.name.clone(),
            description: self.description.clone(),
            ingredients,
        })
    }
}
