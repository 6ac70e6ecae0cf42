use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::task::Priority;
use crate::ops::sort::SortKey;

#[derive(Parser)]
#[command(name = "td", about = concat!("[X] todo-list v", env!("CARGO_PKG_VERSION"), " - a to-do list for the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a script of task commands and print the resulting list
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Script file (default: read from stdin)
    pub file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Script lines
// ---------------------------------------------------------------------------

/// One line of a `td run` script. Positions are 1-based rows of the list
/// as currently displayed.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
pub struct ScriptLine {
    #[command(subcommand)]
    pub command: ScriptCommand,
}

#[derive(Subcommand, Debug)]
pub enum ScriptCommand {
    /// Add a task
    Add {
        name: String,
        /// Due date, YYYY-MM-DD HH:MM
        #[arg(long)]
        due: Option<String>,
        /// Estimated time in hours
        #[arg(long, alias = "est", allow_hyphen_values = true)]
        estimate: Option<String>,
        /// Priority for this task only
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Rename a task
    Edit { position: usize, name: String },
    /// Delete a task
    Delete { position: usize },
    /// Toggle a task's completion
    Complete { position: usize },
    /// Start a task's timer
    Start { position: usize },
    /// Stop a task's timer and print the elapsed time
    Stop { position: usize },
    /// Print a task's elapsed time
    Elapsed { position: usize },
    /// Show only tasks containing a keyword
    Search {
        #[arg(default_value = "")]
        keyword: String,
    },
    /// Sort the list
    Sort { key: SortKey },
    /// Set the priority for tasks added afterwards
    Priority { priority: Priority },
    /// Print the list as currently displayed
    List,
}
