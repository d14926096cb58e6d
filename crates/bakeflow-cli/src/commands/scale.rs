//! Implementation of the `bakeflow scale` command.

use bakeflow_core::application::TemplateResolver;

use crate::{
    cli::{DetailFormat, ScaleArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub async fn execute(
    args: ScaleArgs,
    resolver: &TemplateResolver,
    output: OutputManager,
) -> CliResult<()> {
    // Negated comparison so NaN fails the check as well.
    if !(args.servings > 0.0) {
        return Err(CliError::InvalidInput {
            message: format!("--servings must be positive, got {}", args.servings),
        });
    }

    let recipe = super::require_recipe(resolver, &args.recipe).await?;
    let scaled = recipe.scale_to_servings(args.servings).map_err(|e| {
        CliError::Core(e.into())
    })?;

    match args.format {
        DetailFormat::Human => {
            super::show::render_human(&scaled, &output)?;

            output.header("Total ingredients:")?;
            let mut totals: Vec<_> = scaled
                .total_ingredient_requirements(None)
                .into_iter()
                .collect();
            totals.sort_by(|a, b| a.0.cmp(&b.0));
            for (id, amount) in totals {
                output.print(&format!("  {id}: {amount}"))?;
            }
        }
        DetailFormat::Json => {
            let rendered = serde_json::to_string_pretty(&scaled).map_err(|e| {
                CliError::InvalidInput {
                    message: format!("cannot serialize recipe: {e}"),
                }
            })?;
            println!("{rendered}");
        }
    }

    Ok(())
}
