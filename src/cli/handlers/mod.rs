mod run;
pub use run::{ScriptError, cmd_run, run_script};

use crate::cli::commands::{Cli, Commands};
use crate::io::config_io;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;

    match cli.command {
        // No subcommand → interactive list
        None => crate::tui::run(&config),
        Some(Commands::Run(args)) => cmd_run(args, &config, cli.json),
    }
}
