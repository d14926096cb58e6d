//! Built-in step templates and starter recipes.
//!
//! These ship with the binary so the CLI works out of the box with no
//! external recipe document. They double as the reference vocabulary a
//! JSON recipe document can build on: any source may reuse the template
//! names defined here.

use std::collections::{BTreeMap, HashMap};

use bakeflow_core::domain::{
    AmountSpec, Difficulty, GroupSpec, IngredientSpec, ParamValue, RecipeConfig, RecipeMetadata,
    StepConfig, StepTemplate, StepType,
};

/// The step-template vocabulary shipped with Bakeflow, keyed by template
/// name as referenced from [`StepConfig::template`].
pub fn step_templates() -> HashMap<String, StepTemplate> {
    let mut templates = HashMap::new();

    templates.insert(
        "preheat".to_string(),
        StepTemplate {
            name: "Preheat Oven".into(),
            description: Some("Bring the oven to temperature".into()),
            step_type: StepType::Preparation,
            instructions: vec![
                "Preheat the oven to {temp}°F".into(),
                "Position a rack in the {rack} of the oven".into(),
            ],
            default_params: params([("rack", ParamValue::Text("middle".into()))]),
            required_params: vec!["temp".into()],
        },
    );

    templates.insert(
        "mix".to_string(),
        StepTemplate {
            name: "Mix Ingredients".into(),
            description: Some("Combine ingredients in a bowl".into()),
            step_type: StepType::Preparation,
            instructions: vec!["Mix the ingredients until {texture}".into()],
            default_params: params([("texture", ParamValue::Text("well combined".into()))]),
            required_params: vec![],
        },
    );

    templates.insert(
        "bake".to_string(),
        StepTemplate {
            name: "Bake".into(),
            description: Some("Bake in the preheated oven".into()),
            step_type: StepType::Baking,
            instructions: vec!["Bake at {temp}°F for {time} minutes".into()],
            default_params: BTreeMap::new(),
            required_params: vec!["temp".into(), "time".into()],
        },
    );

    templates.insert(
        "cool".to_string(),
        StepTemplate {
            name: "Cool".into(),
            description: Some("Let the bake cool".into()),
            step_type: StepType::Cooling,
            instructions: vec!["Let cool for {time} minutes before serving".into()],
            default_params: params([("time", ParamValue::Number(10.0))]),
            required_params: vec![],
        },
    );

    templates.insert(
        "rest".to_string(),
        StepTemplate {
            name: "Rest".into(),
            description: Some("Rest or chill the dough".into()),
            step_type: StepType::Preparation,
            instructions: vec!["Rest the dough for {time} minutes".into()],
            default_params: BTreeMap::new(),
            required_params: vec!["time".into()],
        },
    );

    templates.insert(
        "decorate".to_string(),
        StepTemplate {
            name: "Decorate".into(),
            description: Some("Finish and decorate".into()),
            step_type: StepType::Decoration,
            instructions: vec!["{method}".into()],
            default_params: params([("method", ParamValue::Text("Decorate as desired".into()))]),
            required_params: vec![],
        },
    );

    templates
}

/// Starter recipe documents, resolvable entirely against the starter pantry
/// (`StaticCatalog::starter`) and the built-in templates above.
pub fn starter_recipes() -> Vec<RecipeConfig> {
    vec![chocolate_chip_cookies(), vanilla_cupcakes()]
}

fn chocolate_chip_cookies() -> RecipeConfig {
    RecipeConfig {
        id: "chocolate-chip-cookies".into(),
        metadata: RecipeMetadata {
            name: "Chocolate Chip Cookies".into(),
            description: "Classic chewy chocolate chip cookies".into(),
            base_servings: 24.0,
            difficulty: Difficulty::Easy,
            baking_time: 10.0,
            icon: "🍪".into(),
            skill_level: None,
            tags: vec!["cookies".into(), "classic".into()],
        },
        steps: vec![
            StepConfig {
                template: "preheat".into(),
                params: params([("temp", ParamValue::Number(375.0))]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: Some(10.0),
            },
            StepConfig {
                template: "mix".into(),
                params: BTreeMap::new(),
                ingredients: vec![],
                ingredient_groups: vec![GroupSpec {
                    name: "dry".into(),
                    description: Some("Dry ingredients".into()),
                    ingredients: vec![
                        fixed("flour", 2.25),
                        fixed("baking-soda", 1.0),
                        fixed("salt", 1.0),
                    ],
                }],
                custom_instructions: Some(vec![
                    "Whisk {group:dry} together in a medium bowl".into(),
                ]),
                estimated_time: Some(5.0),
            },
            StepConfig {
                template: "mix".into(),
                params: params([("texture", ParamValue::Text("light and fluffy".into()))]),
                ingredients: vec![],
                ingredient_groups: vec![GroupSpec {
                    name: "wet".into(),
                    description: Some("Creamed base".into()),
                    ingredients: vec![
                        fixed("butter", 1.0),
                        fixed("sugar", 0.75),
                        IngredientSpec {
                            id: "brown-sugar".into(),
                            amount: AmountSpec::Range {
                                min: 0.5,
                                max: 1.0,
                                recommended: Some(0.75),
                                step: Some(0.25),
                            },
                            description: Some("more for chewier cookies".into()),
                        },
                        fixed("eggs", 2.0),
                        fixed("vanilla", 1.0),
                    ],
                }],
                custom_instructions: Some(vec![
                    "Cream {group:wet} until {texture}".into(),
                    "Stir the dry mixture into the wet mixture".into(),
                ]),
                estimated_time: Some(10.0),
            },
            StepConfig {
                template: "mix".into(),
                params: BTreeMap::new(),
                ingredients: vec![fixed("chocolate-chips", 2.0)],
                ingredient_groups: vec![],
                custom_instructions: Some(vec!["Fold in {chocolate-chips}".into()]),
                estimated_time: Some(3.0),
            },
            StepConfig {
                template: "bake".into(),
                params: params([
                    ("temp", ParamValue::Number(375.0)),
                    ("time", ParamValue::Number(10.0)),
                ]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: Some(10.0),
            },
            StepConfig {
                template: "cool".into(),
                params: params([("time", ParamValue::Number(15.0))]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: Some(15.0),
            },
        ],
    }
}

fn vanilla_cupcakes() -> RecipeConfig {
    RecipeConfig {
        id: "vanilla-cupcakes".into(),
        metadata: RecipeMetadata {
            name: "Vanilla Cupcakes".into(),
            description: "Light vanilla cupcakes with buttercream".into(),
            base_servings: 12.0,
            difficulty: Difficulty::Medium,
            baking_time: 18.0,
            icon: "🧁".into(),
            skill_level: Some("some piping experience helps".into()),
            tags: vec!["cupcakes".into(), "vanilla".into()],
        },
        steps: vec![
            StepConfig {
                template: "preheat".into(),
                params: params([("temp", ParamValue::Number(350.0))]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: Some(10.0),
            },
            StepConfig {
                template: "mix".into(),
                params: BTreeMap::new(),
                ingredients: vec![],
                ingredient_groups: vec![
                    GroupSpec {
                        name: "dry".into(),
                        description: None,
                        ingredients: vec![
                            fixed("flour", 1.5),
                            fixed("baking-powder", 1.5),
                            fixed("salt", 0.25),
                        ],
                    },
                    GroupSpec {
                        name: "wet".into(),
                        description: None,
                        ingredients: vec![
                            fixed("butter", 0.5),
                            fixed("sugar", 1.0),
                            fixed("eggs", 2.0),
                            fixed("vanilla", 2.0),
                            fixed("milk", 0.5),
                        ],
                    },
                ],
                custom_instructions: Some(vec![
                    "Whisk {group:dry} in one bowl".into(),
                    "Beat {group:wet} in another until smooth".into(),
                    "Fold the dry mixture into the wet in two additions".into(),
                ]),
                estimated_time: Some(15.0),
            },
            StepConfig {
                template: "bake".into(),
                params: params([
                    ("temp", ParamValue::Number(350.0)),
                    ("time", ParamValue::Number(18.0)),
                ]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: Some(vec![
                    "Divide the batter between 12 lined cups".into(),
                    "Bake at {temp}°F for {time} minutes, until a tester comes out clean".into(),
                ]),
                estimated_time: Some(18.0),
            },
            StepConfig {
                template: "cool".into(),
                params: params([("time", ParamValue::Number(30.0))]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: Some(30.0),
            },
            StepConfig {
                template: "decorate".into(),
                params: params([(
                    "method",
                    ParamValue::Text("Pipe buttercream onto each cooled cupcake".into()),
                )]),
                ingredients: vec![],
                ingredient_groups: vec![],
                custom_instructions: None,
                estimated_time: Some(20.0),
            },
        ],
    }
}

fn fixed(id: &str, amount: f64) -> IngredientSpec {
    IngredientSpec {
        id: id.into(),
        amount: AmountSpec::Fixed(amount),
        description: None,
    }
}

fn params<const N: usize>(entries: [(&str, ParamValue); N]) -> BTreeMap<String, ParamValue> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use bakeflow_core::application::ports::IngredientCatalog;

    #[test]
    fn every_template_reference_exists() {
        let templates = step_templates();
        for recipe in starter_recipes() {
            for step in &recipe.steps {
                assert!(
                    templates.contains_key(&step.template),
                    "recipe {} references unknown template {}",
                    recipe.id,
                    step.template
                );
            }
        }
    }

    #[test]
    fn every_ingredient_resolves_against_the_starter_pantry() {
        let pantry = StaticCatalog::starter();
        for recipe in starter_recipes() {
            for step in &recipe.steps {
                let ids = step
                    .ingredients
                    .iter()
                    .map(|i| &i.id)
                    .chain(
                        step.ingredient_groups
                            .iter()
                            .flat_map(|g| g.ingredients.iter().map(|i| &i.id)),
                    );
                for id in ids {
                    assert!(
                        pantry.get(id).is_some(),
                        "recipe {} uses unknown ingredient {id}",
                        recipe.id
                    );
                }
            }
        }
    }

    #[test]
    fn required_params_are_satisfied() {
        let templates = step_templates();
        for recipe in starter_recipes() {
            for step in &recipe.steps {
                let template = &templates[&step.template];
                for required in &template.required_params {
                    assert!(
                        template.default_params.contains_key(required)
                            || step.params.contains_key(required),
                        "recipe {} step {} misses required param {required}",
                        recipe.id,
                        step.template
                    );
                }
            }
        }
    }
}
