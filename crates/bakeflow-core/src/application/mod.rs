//! Application layer: ports and services.
//!
//! Ports are the trait seams adapters implement ([`ports::IngredientCatalog`],
//! [`ports::RecipeSource`]); services orchestrate domain logic behind them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::TemplateResolver;
