//! Implementation of the `bakeflow show` command.

use bakeflow_core::application::TemplateResolver;
use bakeflow_core::domain::MultiStepRecipe;

use crate::{
    cli::{DetailFormat, ShowArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub async fn execute(
    args: ShowArgs,
    resolver: &TemplateResolver,
    output: OutputManager,
) -> CliResult<()> {
    let recipe = super::require_recipe(resolver, &args.recipe).await?;

    match args.format {
        DetailFormat::Human => render_human(&recipe, &output)?,
        DetailFormat::Json => {
            let rendered = serde_json::to_string_pretty(&recipe).map_err(|e| {
                CliError::InvalidInput {
                    message: format!("cannot serialize recipe: {e}"),
                }
            })?;
            println!("{rendered}");
        }
    }

    Ok(())
}

/// Shared human rendering, also used by `scale`.
pub(crate) fn render_human(recipe: &MultiStepRecipe, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("{} {}", recipe.icon(), recipe.name()))?;
    if !recipe.description().is_empty() {
        output.print(&format!("  {}", recipe.description()))?;
    }

    let overview = recipe.overview();
    output.print(&format!(
        "  {} servings | {} steps | ~{:.0} min | {}",
        recipe.base_servings(),
        overview.total_steps,
        overview.total_time,
        overview.difficulty,
    ))?;
    if let Some(level) = recipe.skill_level() {
        output.print(&format!("  Skill: {level}"))?;
    }
    output.print("")?;

    for step in recipe.steps() {
        output.header(&format!("Step {}: {}", step.order(), step.name()))?;

        for group in step.groups() {
            output.print(&format!("  [{}]", group.name()))?;
            for item in group.ingredients() {
                print_ingredient(output, item)?;
            }
        }
        for item in step.ingredients() {
            print_ingredient(output, item)?;
        }

        for line in step.formatted_instructions(None) {
            output.print(&format!("  • {line}"))?;
        }
        if let Some(minutes) = step.estimated_time() {
            output.print(&format!("  (~{minutes:.0} min)"))?;
        }
        output.print("")?;
    }

    Ok(())
}

fn print_ingredient(
    output: &OutputManager,
    item: &bakeflow_core::domain::FlexibleIngredient,
) -> CliResult<()> {
    let note = item
        .description()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();
    // display_amount already renders "<amount> <unit> <name>".
    output.print(&format!("    - {}{}", item.display_amount(None), note))?;
    Ok(())
}
