//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "bakeflow",
    bin_name = "bakeflow",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f9c1} Recipe composition and scaling",
    long_about = "Bakeflow resolves declarative baking recipes from step \
                  templates and scales them to any serving count.",
    after_help = "EXAMPLES:\n\
        \x20 bakeflow list\n\
        \x20 bakeflow show chocolate-chip-cookies\n\
        \x20 bakeflow scale chocolate-chip-cookies --servings 36\n\
        \x20 bakeflow check vanilla-cupcakes --have flour=2 --have sugar=1",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available recipes.
    #[command(
        visible_alias = "ls",
        about = "List available recipes",
        after_help = "EXAMPLES:\n\
            \x20 bakeflow list\n\
            \x20 bakeflow list --format json\n\
            \x20 bakeflow list --recipes ./my-recipes.json"
    )]
    List(ListArgs),

    /// Show one recipe in full: steps, instructions, ingredients.
    #[command(
        about = "Show a recipe in full",
        after_help = "EXAMPLES:\n\
            \x20 bakeflow show chocolate-chip-cookies\n\
            \x20 bakeflow show vanilla-cupcakes --format json"
    )]
    Show(ShowArgs),

    /// Scale a recipe to a target serving count.
    #[command(
        about = "Scale a recipe to a serving count",
        after_help = "EXAMPLES:\n\
            \x20 bakeflow scale chocolate-chip-cookies --servings 36\n\
            \x20 bakeflow scale vanilla-cupcakes -s 6 --format json"
    )]
    Scale(ScaleArgs),

    /// Check a recipe against the ingredients you have on hand.
    #[command(
        about = "Check a recipe against your pantry",
        after_help = "EXAMPLES:\n\
            \x20 bakeflow check chocolate-chip-cookies --have flour=3 --have sugar=1\n\
            \x20 bakeflow check vanilla-cupcakes --have flour=1.5 --have eggs=2"
    )]
    Check(CheckArgs),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `bakeflow list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `bakeflow show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Recipe id, as printed by `bakeflow list`.
    #[arg(value_name = "RECIPE", help = "Recipe id")]
    pub recipe: String,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: DetailFormat,
}

/// Output format for `show` and `scale`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DetailFormat {
    /// Human-readable step listing.
    Human,
    /// Full recipe as JSON.
    Json,
}

// ── scale ─────────────────────────────────────────────────────────────────────

/// Arguments for `bakeflow scale`.
#[derive(Debug, Args)]
pub struct ScaleArgs {
    /// Recipe id, as printed by `bakeflow list`.
    #[arg(value_name = "RECIPE", help = "Recipe id")]
    pub recipe: String,

    /// Target serving count.
    #[arg(
        short = 's',
        long = "servings",
        value_name = "COUNT",
        help = "Target serving count"
    )]
    pub servings: f64,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: DetailFormat,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `bakeflow check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Recipe id, as printed by `bakeflow list`.
    #[arg(value_name = "RECIPE", help = "Recipe id")]
    pub recipe: String,

    /// An ingredient you have, as `id=amount`.  Repeatable.
    #[arg(
        long = "have",
        value_name = "ID=AMOUNT",
        help = "Available ingredient, e.g. --have flour=2.5"
    )]
    pub have: Vec<String>,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_list_command() {
        let cli = Cli::parse_from(["bakeflow", "list"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn parse_scale_command() {
        let cli = Cli::parse_from(["bakeflow", "scale", "cookies", "--servings", "36"]);
        if let Commands::Scale(args) = cli.command {
            assert_eq!(args.recipe, "cookies");
            assert_eq!(args.servings, 36.0);
        } else {
            panic!("expected Scale command");
        }
    }

    #[test]
    fn parse_check_with_repeated_have() {
        let cli = Cli::parse_from([
            "bakeflow", "check", "cookies", "--have", "flour=2", "--have", "sugar=1",
        ]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.have, vec!["flour=2", "sugar=1"]);
        } else {
            panic!("expected Check command");
        }
    }

    #[test]
    fn list_alias() {
        let cli = Cli::parse_from(["bakeflow", "ls"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["bakeflow", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
