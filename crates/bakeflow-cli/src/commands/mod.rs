//! Command handlers.  One module per subcommand; all business logic lives in
//! `bakeflow-core`, these only translate between CLI arguments and the
//! resolver API.

pub mod check;
pub mod list;
pub mod scale;
pub mod show;

use bakeflow_core::application::TemplateResolver;
use bakeflow_core::domain::MultiStepRecipe;

use crate::error::{CliError, CliResult};

/// Fetch a recipe by id or fail with a not-found error.
pub(crate) async fn require_recipe(
    resolver: &TemplateResolver,
    id: &str,
) -> CliResult<MultiStepRecipe> {
    resolver
        .recipe(id)
        .await?
        .ok_or_else(|| CliError::RecipeNotFound { id: id.to_string() })
}
