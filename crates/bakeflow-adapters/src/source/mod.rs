//! Recipe source adapters.

mod json_file;
mod memory;

pub use json_file::{JsonFileSource, RecipeDocument};
pub use memory::MemorySource;
