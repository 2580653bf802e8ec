//! # remindrs
//!
//! A Reminders-style to-do list for the terminal. Tasks live in memory for
//! the lifetime of the process; every run starts from the built-in demo
//! reminders (or an empty list, see Configuration).
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! remindrs
//! # or explicitly
//! remindrs ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `Tab` / `Shift-Tab` / `1`-`5`: Switch list (Reminders, Today, Scheduled, Flagged, Completed)
//! *   `j` / `k`: Move selection
//! *   `Space`: Toggle done
//! *   `a`: Add a reminder
//! *   `e` / `n`: Edit title / notes
//! *   `p`: Cycle priority
//! *   `d`: Delete
//! *   `/`: Search title and notes
//! *   `X`: Clear completed
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! remindrs list --view scheduled --group
//! remindrs list --search groc --json
//! remindrs counts
//! remindrs overdue
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/remindrs/config.json` (override with
//! `REMINDRS_CONFIG`):
//!
//! ```json
//! { "default_list": "reminders", "seed_demo_data": true }
//! ```
//!
//! Logging is controlled with `REMINDRS_LOG` (e.g. `REMINDRS_LOG=debug`).

use std::io;
use std::process::ExitCode;

use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use remindrs::commands::{cmd_counts, cmd_list, cmd_overdue};
use remindrs::config::load_config;
use remindrs::tui::run_tui;
use remindrs::{Error, Result, TaskList, TaskStore};

const LOG_ENV: &str = "REMINDRS_LOG";

#[derive(Parser)]
#[command(name = "remindrs")]
#[command(about = "Reminders-style to-do list for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tasks of a view
    List {
        /// reminders, today, scheduled, flagged or completed
        #[arg(short, long, default_value = "reminders")]
        view: String,
        /// Only show tasks whose title or notes contain this text
        #[arg(short, long)]
        search: Option<String>,
        /// Split the list into sections by due day
        #[arg(short, long)]
        group: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how many tasks each view holds
    Counts {
        #[arg(long)]
        json: bool,
    },
    /// List incomplete tasks that are past due
    Overdue {
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn init_logging(interactive: bool) {
    // Log lines would scribble over the alternate screen unless asked for.
    if interactive && std::env::var_os(LOG_ENV).is_none() {
        return;
    }
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let mut store = TaskStore::new(&config);
    let now = Local::now();

    match cli.command {
        Some(Commands::List { view, search, group, json }) => {
            let view = TaskList::from_name(&view).ok_or(Error::UnknownView(view))?;
            store.set_selected_view(view);
            if let Some(q) = search {
                store.set_search_query(q);
            }
            cmd_list(&store, now, group, json)
        }
        Some(Commands::Counts { json }) => cmd_counts(&store, now, json),
        Some(Commands::Overdue { json }) => cmd_overdue(&store, now, json),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => return Err(Error::UnsupportedShell(shell)),
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "remindrs", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Ui) | None => run_tui(store),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Some(Commands::Ui) | None));
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
