mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

use crate::commands::{cmd_add, cmd_clear, cmd_delete, cmd_edit, cmd_list, cmd_shell};
use crate::config::Config;
use caltrack_core::ClearScope;

#[derive(Parser)]
#[command(
    name = "caltrack",
    version,
    about = "A tiny calorie tally",
    long_about = "Log meals with a calorie count, keep a running total, and edit or delete \
                  entries. The list is kept in a local database between runs."
)]
struct Cli {
    /// Path to the database file (default: platform data directory)
    #[arg(long, global = true, env = "CALTRACK_DB", value_name = "PATH")]
    db: Option<PathBuf>,
    /// What `clear` removes from the database: only the item list, or every stored key
    #[arg(long, global = true, env = "CALTRACK_CLEAR_SCOPE", value_enum, default_value = "key")]
    clear_scope: ScopeArg,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Key,
    All,
}

impl From<ScopeArg> for ClearScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Key => ClearScope::Key,
            ScopeArg::All => ClearScope::All,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show all items and the running total
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item
    Add {
        /// Meal name
        meal: String,
        /// Calories (leading integer is used, e.g. "250" or "250kcal")
        #[arg(allow_hyphen_values = true)]
        cals: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the name and calories of an item
    Edit {
        /// Item ID
        id: i64,
        /// New meal name
        meal: String,
        /// New calories
        #[arg(allow_hyphen_values = true)]
        cals: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an item by ID
    Delete {
        /// Item ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every item
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open an interactive session
    Shell,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db, cli.clear_scope.into())?;
    tracing::debug!(db = %config.db_path.display(), "using database");
    let tracker = config.open_tracker()?;

    match cli.command {
        Commands::List { json } => cmd_list(&tracker, json),
        Commands::Add { meal, cals, json } => cmd_add(tracker, &meal, &cals, json),
        Commands::Edit {
            id,
            meal,
            cals,
            json,
        } => cmd_edit(tracker, id, &meal, &cals, json),
        Commands::Delete { id, json } => cmd_delete(tracker, id, json),
        Commands::Clear { json } => cmd_clear(tracker, json),
        Commands::Shell => cmd_shell(tracker),
    }
}
