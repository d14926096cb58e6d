//! # Bakeflow CLI
//!
//! Recipe composition and scaling from declarative documents.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Wire adapters and build the [`TemplateResolver`].
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info, instrument};

use bakeflow_adapters::{JsonFileSource, MemorySource, StaticCatalog};
use bakeflow_core::application::TemplateResolver;
use bakeflow_core::application::ports::{IngredientCatalog, RecipeSource};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod error;
mod logging;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    // ── 1. Parse arguments ────────────────────────────────────────────────
    // clap handles --help / --version and exits automatically; errors here
    // are argument-parse failures (exit 2).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Render clap's own output (already user-friendly): --help and
            // --version go to stdout with exit 0, parse errors to stderr
            // with exit 2.
            e.exit();
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Wire adapters + resolver ───────────────────────────────────────
    let resolver = build_resolver(&cli.global);

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global);
    let verbose = cli.global.verbose > 0;

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, &resolver, output).await {
        Ok(()) => {
            info!("Bakeflow completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Choose the recipe source from the global flags and assemble the resolver.
///
/// Without `--recipes`, the built-in starter documents serve the recipes.
/// No external ingredient service is wired in yet, so the starter pantry
/// fills both the primary and fallback catalog slots.
fn build_resolver(global: &GlobalArgs) -> TemplateResolver {
    let source: Arc<dyn RecipeSource> = match &global.recipes {
        Some(path) => Arc::new(JsonFileSource::new(path)),
        None => Arc::new(MemorySource::with_builtin()),
    };
    let pantry: Arc<dyn IngredientCatalog> = Arc::new(StaticCatalog::starter());
    TemplateResolver::new(source, pantry.clone(), pantry)
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
async fn run(cli: Cli, resolver: &TemplateResolver, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::List(cmd) => commands::list::execute(cmd, resolver, output).await,
        Commands::Show(cmd) => commands::show::execute(cmd, resolver, output).await,
        Commands::Scale(cmd) => commands::scale::execute(cmd, resolver, output).await,
        Commands::Check(cmd) => commands::check::execute(cmd, resolver, output).await,
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes — the format/suggestion machinery in `CliError`
/// is all exercised here.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    // 1. Emit a structured log event at the right severity.
    err.log();

    // 2. Print a user-friendly message.  We write directly to stderr so the
    //    message appears even when stdout is redirected.
    //
    //    Colour is disabled when stderr is not a TTY (same logic as logging.rs).
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
