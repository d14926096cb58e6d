//! The recipe aggregate: an ordered, validated collection of steps.
//!
//! ## Invariants (enforced by `build()`)
//!
//! 1. `id` and `name` are non-empty
//! 2. `base_servings > 0`, `baking_time >= 0`
//! 3. At least one step
//! 4. **Contiguity**: after sorting by `order`, the sequence of orders is
//!    exactly `1..=N` — any gap, duplicate, or non-1 start fails with
//!    [`DomainError::OrderGap`]
//!
//! The aggregate is an immutable value tree: `scale_to_servings` returns a
//! new recipe, never mutates in place.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ingredient::{Ingredient, format_amount};
use crate::domain::entities::step::{CustomAmounts, RecipeStep};
use crate::domain::error::DomainError;

/// Recipe difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

/// Per-step amount overrides, keyed by step `order`.
pub type StepCustomAmounts = HashMap<u32, CustomAmounts>;

/// A shortfall reported by [`MultiStepRecipe::missing_ingredients`].
#[derive(Debug, Clone, PartialEq)]
pub struct MissingIngredient {
    /// The ingredient, looked up from whichever step first references its id.
    pub ingredient: Ingredient,
    /// Positive amount still needed beyond what is available.
    pub missing: f64,
}

/// Summary returned by [`MultiStepRecipe::overview`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeOverview {
    pub total_steps: usize,
    /// Sum of per-step `estimated_time`, counting absent values as 0.
    pub total_time: f64,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub servings: f64,
}

/// An ordered, validated multi-step recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiStepRecipe {
    id: String,
    name: String,
    description: String,
    base_servings: f64,
    difficulty: Difficulty,
    baking_time: f64,
    icon: String,
    tags: Vec<String>,
    skill_level: Option<String>,
    /// Kept sorted by `order` from construction onward.
    steps: Vec<RecipeStep>,
}

impl MultiStepRecipe {
    /// Start the builder pattern for fluent construction.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> MultiStepRecipeBuilder {
        MultiStepRecipeBuilder::new(id, name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base_servings(&self) -> f64 {
        self.base_servings
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn baking_time(&self) -> f64 {
        self.baking_time
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn skill_level(&self) -> Option<&str> {
        self.skill_level.as_deref()
    }

    /// Steps in execution order (sorted by `order` at construction).
    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn step(&self, order: u32) -> Option<&RecipeStep> {
        // Orders are contiguous from 1, so this is a direct index.
        self.steps.get(order.checked_sub(1)? as usize)
    }

    // ── Aggregate ingredient math ─────────────────────────────────────────

    /// Total required amount per ingredient id across all steps.
    ///
    /// `overrides` optionally replaces requested amounts per step (keyed by
    /// step order, then ingredient id). Duplicate ids across steps are
    /// summed.
    pub fn total_ingredient_requirements(
        &self,
        overrides: Option<&StepCustomAmounts>,
    ) -> HashMap<String, f64> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for step in &self.steps {
            let custom = overrides.and_then(|m| m.get(&step.order()));
            for (id, amount) in step.ingredient_amounts(custom) {
                *totals.entry(id).or_insert(0.0) += amount;
            }
        }
        totals
    }

    /// True iff every required ingredient total is covered by `available`
    /// (absent entries count as 0).
    pub fn can_be_made_with(
        &self,
        available: &HashMap<String, f64>,
        overrides: Option<&StepCustomAmounts>,
    ) -> bool {
        self.total_ingredient_requirements(overrides)
            .iter()
            .all(|(id, required)| available.get(id).copied().unwrap_or(0.0) >= *required)
    }

    /// Positive shortfalls against `available`, in first-reference order.
    pub fn missing_ingredients(
        &self,
        available: &HashMap<String, f64>,
        overrides: Option<&StepCustomAmounts>,
    ) -> Vec<MissingIngredient> {
        let requirements = self.total_ingredient_requirements(overrides);

        // Walk steps in order so the report is deterministic and each id is
        // paired with the ingredient from the step that first references it.
        let mut reported = std::collections::HashSet::new();
        let mut missing = Vec::new();
        for step in &self.steps {
            for fi in step.all_ingredients() {
                if !reported.insert(fi.id().to_string()) {
                    continue;
                }
                let required = requirements.get(fi.id()).copied().unwrap_or(0.0);
                let have = available.get(fi.id()).copied().unwrap_or(0.0);
                if required > have {
                    missing.push(MissingIngredient {
                        ingredient: fi.ingredient().clone(),
                        missing: required - have,
                    });
                }
            }
        }
        missing
    }

    // ── Scaling ───────────────────────────────────────────────────────────

    /// Return a new recipe scaled to `target` servings.
    ///
    /// Every step is scaled by `target / base_servings`; the new recipe's
    /// name is suffixed with the target serving count and its
    /// `base_servings` becomes `target`.
    pub fn scale_to_servings(&self, target: f64) -> Result<Self, DomainError> {
        // Written as a negated comparison so NaN is rejected too.
        if !(target > 0.0) {
            return Err(DomainError::NonPositive {
                field: "target servings",
                value: target,
            });
        }

        let factor = target / self.base_servings;
        let steps = self
            .steps
            .iter()
            .map(|s| s.scale(factor))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: self.id.clone(),
            name: format!("{} ({} servings)", self.name, format_amount(target)),
            description: self.description.clone(),
            base_servings: target,
            difficulty: self.difficulty,
            baking_time: self.baking_time,
            icon: self.icon.clone(),
            tags: self.tags.clone(),
            skill_level: self.skill_level.clone(),
            steps,
        })
    }

    /// Condensed summary for listings.
    pub fn overview(&self) -> RecipeOverview {
        RecipeOverview {
            total_steps: self.steps.len(),
            total_time: self
                .steps
                .iter()
                .filter_map(|s| s.estimated_time())
                .sum(),
            difficulty: self.difficulty,
            tags: self.tags.clone(),
            servings: self.base_servings,
        }
    }
}

/// Builder for constructing recipes with validation at `build()`.
pub struct MultiStepRecipeBuilder {
    id: String,
    name: String,
    description: String,
    base_servings: f64,
    difficulty: Difficulty,
    baking_time: f64,
    icon: String,
    tags: Vec<String>,
    skill_level: Option<String>,
    steps: Vec<RecipeStep>,
}

impl MultiStepRecipeBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            base_servings: 1.0,
            difficulty: Difficulty::Easy,
            baking_time: 0.0,
            icon: String::new(),
            tags: Vec::new(),
            skill_level: None,
            steps: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn base_servings(mut self, servings: f64) -> Self {
        self.base_servings = servings;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn baking_time(mut self, minutes: f64) -> Self {
        self.baking_time = minutes;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn skill_level(mut self, level: impl Into<String>) -> Self {
        self.skill_level = Some(level.into());
        self
    }

    pub fn step(mut self, step: RecipeStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: Vec<RecipeStep>) -> Self {
        self.steps = steps;
        self
    }

    /// Consume the builder and construct a validated [`MultiStepRecipe`].
    ///
    /// Steps are sorted by `order`, then scanned for contiguity: the i-th
    /// sorted step (0-indexed) must carry `order == i + 1`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if id or name is blank
    /// - `NonPositive` / `Negative` for invalid servings or baking time
    /// - `EmptyRecipe` if no steps were provided
    /// - `OrderGap` if sorted orders are not exactly `1..=N`
    pub fn build(self) -> Result<MultiStepRecipe, DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "recipe id" });
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyField {
                field: "recipe name",
            });
        }
        if self.base_servings <= 0.0 {
            return Err(DomainError::NonPositive {
                field: "base_servings",
                value: self.base_servings,
            });
        }
        if self.baking_time < 0.0 {
            return Err(DomainError::Negative {
                field: "baking_time",
                value: self.baking_time,
            });
        }
        if self.steps.is_empty() {
            return Err(DomainError::EmptyRecipe { recipe_id: self.id });
        }

        let mut steps = self.steps;
        steps.sort_by_key(RecipeStep::order);

        for (index, step) in steps.iter().enumerate() {
            let expected = index as u32 + 1;
            if step.order() != expected {
                return Err(DomainError::OrderGap {
                    position: index,
                    expected,
                    found: step.order(),
                });
            }
        }

        Ok(MultiStepRecipe {
            id: self.id,
            name: self.name,
            description: self.description,
            base_servings: self.base_servings,
            difficulty: self.difficulty,
            baking_time: self.baking_time,
            icon: self.icon,
            tags: self.tags,
            skill_level: self.skill_level,
            steps,
        })
    }
}
