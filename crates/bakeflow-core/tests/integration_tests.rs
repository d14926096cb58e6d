//! Integration tests for bakeflow-core: composing a full recipe from the
//! step factories and exercising it end to end.

use std::collections::HashMap;

use bakeflow_core::domain::{
    Difficulty, FlexibleIngredient, Ingredient, MultiStepRecipe, steps,
};

fn pantry_item(id: &str, name: &str, unit: &str, amount: f64) -> FlexibleIngredient {
    FlexibleIngredient::fixed(Ingredient::new(id, name, unit, ""), amount).unwrap()
}

fn sugar_cookie_recipe() -> MultiStepRecipe {
    let dry = vec![
        pantry_item("flour", "Flour", "cups", 2.75),
        pantry_item("baking-soda", "Baking Soda", "teaspoons", 1.0),
    ];
    let wet = vec![
        pantry_item("butter", "Butter", "cups", 1.0),
        pantry_item("sugar", "Sugar", "cups", 1.5),
        pantry_item("eggs", "Eggs", "large", 1.0),
    ];

    let mut all_steps = vec![
        steps::mix_dry(dry).unwrap(),
        steps::mix_wet(wet).unwrap(),
    ];
    all_steps.extend(steps::cookie_bake_sequence(375.0, 9.0, 10.0).unwrap());

    // cookie_bake_sequence renumbers its own members from 1; shift the
    // whole list into one contiguous run.
    let all_steps: Vec<_> = all_steps
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.with_order(i as u32 + 1))
        .collect();

    MultiStepRecipe::builder("sugar-cookies", "Sugar Cookies")
        .base_servings(24.0)
        .difficulty(Difficulty::Easy)
        .baking_time(9.0)
        .steps(all_steps)
        .build()
        .unwrap()
}

#[test]
fn factory_steps_compose_into_a_valid_recipe() {
    let recipe = sugar_cookie_recipe();
    assert_eq!(recipe.steps().len(), 5);
    assert_eq!(recipe.step(1).unwrap().name(), "Mix dry ingredients");
    assert_eq!(recipe.step(3).unwrap().name(), "Preheat Oven");

    let overview = recipe.overview();
    assert_eq!(overview.total_steps, 5);
    // 5 + 5 + 10 + 9 + 10
    assert_eq!(overview.total_time, 39.0);
}

#[test]
fn group_tokens_render_with_amounts() {
    let recipe = sugar_cookie_recipe();
    let lines = recipe.step(1).unwrap().formatted_instructions(None);
    assert_eq!(
        lines[0],
        "Combine 2.75 cups Flour, 1 teaspoons Baking Soda in a large bowl"
    );
}

#[test]
fn scaling_flows_through_amounts_times_and_name() {
    let recipe = sugar_cookie_recipe();
    let tripled = recipe.scale_to_servings(72.0).unwrap();

    assert_eq!(tripled.name(), "Sugar Cookies (72 servings)");
    assert_eq!(tripled.base_servings(), 72.0);

    let totals = tripled.total_ingredient_requirements(None);
    assert_eq!(totals["flour"], 8.25);
    assert_eq!(totals["sugar"], 4.5);

    // The bake step's time parameter scales and re-renders.
    let bake = tripled.step(4).unwrap();
    assert_eq!(bake.parameters().time(), Some(27.0));
    assert!(
        bake.formatted_instructions(None)[0].contains("27 minutes"),
        "bake instructions should carry the scaled time"
    );
    // Temperature never scales.
    assert_eq!(bake.temperature(), Some(375.0));
}

#[test]
fn pantry_math_matches_requirements() {
    let recipe = sugar_cookie_recipe();

    let mut pantry: HashMap<String, f64> = [
        ("flour".to_string(), 3.0),
        ("baking-soda".to_string(), 2.0),
        ("butter".to_string(), 1.0),
        ("sugar".to_string(), 1.5),
        ("eggs".to_string(), 1.0),
    ]
    .into();
    assert!(recipe.can_be_made_with(&pantry, None));

    pantry.insert("sugar".to_string(), 1.0);
    let missing = recipe.missing_ingredients(&pantry, None);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].ingredient.id, "sugar");
    assert_eq!(missing[0].missing, 0.5);
}
