//! Domain entities, leaf-first: ingredient → group → step → recipe.

pub mod group;
pub mod ingredient;
pub mod recipe;
pub mod step;
