//! Implementation of the `bakeflow check` command.

use std::collections::HashMap;

use bakeflow_core::application::TemplateResolver;

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub async fn execute(
    args: CheckArgs,
    resolver: &TemplateResolver,
    output: OutputManager,
) -> CliResult<()> {
    let available = parse_pantry(&args.have)?;
    let recipe = super::require_recipe(resolver, &args.recipe).await?;

    let missing = recipe.missing_ingredients(&available, None);
    if missing.is_empty() {
        output.success(&format!(
            "You can make {} with what you have",
            recipe.name()
        ))?;
        return Ok(());
    }

    output.error(&format!("{} is short {} ingredient(s):", recipe.name(), missing.len()))?;
    for shortfall in &missing {
        output.print(&format!(
            "  - {} {} more {}",
            shortfall.missing, shortfall.ingredient.unit, shortfall.ingredient.name
        ))?;
    }

    // Shortfalls are a user outcome, not a failure of the command itself.
    Ok(())
}

/// Parse repeated `id=amount` pairs into an availability map.
fn parse_pantry(pairs: &[String]) -> CliResult<HashMap<String, f64>> {
    let mut pantry = HashMap::new();
    for pair in pairs {
        let (id, amount) = pair.split_once('=').ok_or_else(|| CliError::InvalidInput {
            message: format!("--have expects id=amount, got '{pair}'"),
        })?;
        let amount: f64 = amount.parse().map_err(|_| CliError::InvalidInput {
            message: format!("invalid amount in '--have {pair}'"),
        })?;
        if amount < 0.0 {
            return Err(CliError::InvalidInput {
                message: format!("amount cannot be negative in '--have {pair}'"),
            });
        }
        // Repeated ids accumulate.
        *pantry.entry(id.to_string()).or_insert(0.0) += amount;
    }
    Ok(pantry)
}
