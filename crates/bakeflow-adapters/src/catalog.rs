//! Static ingredient catalogs.

use std::collections::HashMap;

use bakeflow_core::application::ports::IngredientCatalog;
use bakeflow_core::domain::Ingredient;

/// Immutable in-memory ingredient catalog.
///
/// Built once and shared behind an `Arc`; lookups are lock-free reads.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<String, Ingredient>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of ingredients, last entry winning on
    /// duplicate ids.
    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        Self {
            entries: ingredients
                .into_iter()
                .map(|i| (i.id.clone(), i))
                .collect(),
        }
    }

    /// The starter pantry: common baking ingredients every recipe source can
    /// rely on being resolvable. Used as the resolver's fallback catalog.
    pub fn starter() -> Self {
        Self::from_ingredients([
            Ingredient::new("flour", "All-Purpose Flour", "cups", "🌾"),
            Ingredient::new("sugar", "Granulated Sugar", "cups", "🍚"),
            Ingredient::new("brown-sugar", "Brown Sugar", "cups", "🟤"),
            Ingredient::new("powdered-sugar", "Powdered Sugar", "cups", "❄️"),
            Ingredient::new("butter", "Unsalted Butter", "cups", "🧈"),
            Ingredient::new("eggs", "Eggs", "large", "🥚"),
            Ingredient::new("milk", "Whole Milk", "cups", "🥛"),
            Ingredient::new("vanilla", "Vanilla Extract", "teaspoons", "🌼"),
            Ingredient::new("baking-soda", "Baking Soda", "teaspoons", "🧂"),
            Ingredient::new("baking-powder", "Baking Powder", "teaspoons", "🥄"),
            Ingredient::new("salt", "Salt", "teaspoons", "🧂"),
            Ingredient::new("chocolate-chips", "Chocolate Chips", "cups", "🍫"),
            Ingredient::new("cocoa", "Cocoa Powder", "cups", "🍫"),
            Ingredient::new("cinnamon", "Ground Cinnamon", "teaspoons", "🟫"),
            Ingredient::new("vegetable-oil", "Vegetable Oil", "cups", "🫗"),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IngredientCatalog for StaticCatalog {
    fn get(&self, id: &str) -> Option<Ingredient> {
        self.entries.get(id).cloned()
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}
