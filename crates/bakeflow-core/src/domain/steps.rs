//! Canned step constructors and sequence combinators.
//!
//! Pure convenience: each factory produces a conventional [`RecipeStep`]
//! (preheat, timed bake, mix a named group, ...) with default instruction
//! text. Factory steps carry the provisional order `0`, which a recipe
//! rejects — callers must overwrite it via [`RecipeStep::with_order`] so the
//! whole recipe ends up contiguous from 1. The sequence combinators do that
//! renumbering for their own members.

use crate::domain::entities::group::IngredientGroup;
use crate::domain::entities::ingredient::FlexibleIngredient;
use crate::domain::entities::step::{RecipeStep, StepType};
use crate::domain::error::DomainError;

/// Preheat the oven to `temp` degrees.
pub fn preheat(temp: f64) -> Result<RecipeStep, DomainError> {
    RecipeStep::builder("preheat", "Preheat Oven", StepType::Preparation)
        .description("Bring the oven up to temperature")
        .instruction("Preheat the oven to {temp}°F")
        .param("temp", temp)
        .temperature(temp)
        .estimated_time(10.0)
        .build()
}

/// Bake at `temp` degrees for `time` minutes.
pub fn bake(temp: f64, time: f64) -> Result<RecipeStep, DomainError> {
    RecipeStep::builder("bake", "Bake", StepType::Baking)
        .description("Bake until done")
        .instruction("Bake at {temp}°F for {time} minutes")
        .instruction("Rotate halfway through for even browning")
        .param("temp", temp)
        .param("time", time)
        .temperature(temp)
        .estimated_time(time)
        .build()
}

/// Mix the members of `group` together in one bowl.
pub fn mix_group(group: IngredientGroup) -> Result<RecipeStep, DomainError> {
    let name = group.name().to_string();
    RecipeStep::builder(
        format!("mix-{name}"),
        format!("Mix {name} ingredients"),
        StepType::Preparation,
    )
    .instruction(format!("Combine {{group:{name}}} in a large bowl"))
    .instruction("Mix until fully incorporated")
    .group(group)
    .estimated_time(5.0)
    .build()
}

/// Mix a group named "dry".
pub fn mix_dry(ingredients: Vec<FlexibleIngredient>) -> Result<RecipeStep, DomainError> {
    mix_group(IngredientGroup::new("dry", ingredients)?.with_description("Dry ingredients"))
}

/// Mix a group named "wet".
pub fn mix_wet(ingredients: Vec<FlexibleIngredient>) -> Result<RecipeStep, DomainError> {
    mix_group(IngredientGroup::new("wet", ingredients)?.with_description("Wet ingredients"))
}

/// Cool for `time` minutes.
pub fn cool(time: f64) -> Result<RecipeStep, DomainError> {
    RecipeStep::builder("cool", "Cool", StepType::Cooling)
        .instruction("Let cool for {time} minutes before serving")
        .param("time", time)
        .estimated_time(time)
        .build()
}

/// Decoration step with caller-provided instruction text.
pub fn decorate(instruction: impl Into<String>) -> Result<RecipeStep, DomainError> {
    RecipeStep::builder("decorate", "Decorate", StepType::Decoration)
        .instruction(instruction)
        .estimated_time(15.0)
        .build()
}

/// Rest or rise the dough for `time` minutes.
pub fn rest(time: f64) -> Result<RecipeStep, DomainError> {
    RecipeStep::builder("rest", "Rest", StepType::Preparation)
        .instruction("Cover and let rest for {time} minutes")
        .param("time", time)
        .estimated_time(time)
        .build()
}

/// Grease and line the baking pans.
pub fn prepare_pans() -> Result<RecipeStep, DomainError> {
    RecipeStep::builder("prepare-pans", "Prepare Pans", StepType::Preparation)
        .instruction("Grease the pans and line them with parchment paper")
        .estimated_time(5.0)
        .build()
}

/// Fully generic step: caller supplies everything the builder validates.
pub fn custom(
    id: impl Into<String>,
    name: impl Into<String>,
    step_type: StepType,
    instructions: Vec<String>,
) -> Result<RecipeStep, DomainError> {
    RecipeStep::builder(id, name, step_type)
        .instructions(instructions)
        .build()
}

// ── Sequence combinators ──────────────────────────────────────────────────

/// preheat + bake + cool, renumbered 1..3.
pub fn cookie_bake_sequence(
    temp: f64,
    bake_time: f64,
    cool_time: f64,
) -> Result<Vec<RecipeStep>, DomainError> {
    renumber(vec![preheat(temp)?, bake(temp, bake_time)?, cool(cool_time)?])
}

/// preheat + prepare pans + bake + cool, renumbered 1..4.
pub fn cake_bake_sequence(
    temp: f64,
    bake_time: f64,
    cool_time: f64,
) -> Result<Vec<RecipeStep>, DomainError> {
    renumber(vec![
        preheat(temp)?,
        prepare_pans()?,
        bake(temp, bake_time)?,
        cool(cool_time)?,
    ])
}

fn renumber(steps: Vec<RecipeStep>) -> Result<Vec<RecipeStep>, DomainError> {
    Ok(steps
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.with_order(i as u32 + 1))
        .collect())
}
