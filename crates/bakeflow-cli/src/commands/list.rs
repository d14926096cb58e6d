//! Implementation of the `bakeflow list` command.

use serde_json::json;

use bakeflow_core::application::TemplateResolver;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub async fn execute(
    args: ListArgs,
    resolver: &TemplateResolver,
    output: OutputManager,
) -> CliResult<()> {
    let recipes = resolver.all_recipes().await?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Recipes:")?;
            for recipe in &recipes {
                let overview = recipe.overview();
                output.print(&format!(
                    "  {} {}  — {} servings, {} steps, ~{:.0} min, {}",
                    recipe.icon(),
                    recipe.id(),
                    recipe.base_servings(),
                    overview.total_steps,
                    overview.total_time,
                    overview.difficulty,
                ))?;
            }
            if recipes.is_empty() {
                output.warning("No recipes loaded")?;
            }
        }

        ListFormat::List => {
            for recipe in &recipes {
                println!("{}", recipe.id());
            }
        }

        ListFormat::Json => {
            // Serialise to stdout directly (bypasses OutputManager because
            // JSON output must be parseable even in non-TTY pipes).
            let summaries: Vec<_> = recipes
                .iter()
                .map(|r| {
                    let o = r.overview();
                    json!({
                        "id": r.id(),
                        "name": r.name(),
                        "servings": r.base_servings(),
                        "steps": o.total_steps,
                        "totalTime": o.total_time,
                        "difficulty": o.difficulty,
                        "tags": o.tags,
                    })
                })
                .collect();
            let rendered = serde_json::to_string_pretty(&summaries)
                .unwrap_or_else(|_| "[]".into());
            println!("{rendered}");
        }
    }

    Ok(())
}
