use std::io::{Read, Write};

use clap::Parser;
use log::debug;

use crate::cli::commands::{RunArgs, ScriptCommand, ScriptLine};
use crate::cli::output::{TaskListJson, format_rows, task_to_json};
use crate::control::{Controller, Outcome, ScriptedPrompter};
use crate::model::config::Config;
use crate::parse::{InputError, format_elapsed, parse_due_date, parse_estimate, split_words};

/// Error type for `td run` scripts. Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Input { line: usize, source: InputError },
    #[error("line {line}: no task at row {row}")]
    NoSuchRow { line: usize, row: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn cmd_run(args: RunArgs, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let script = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut ctl = Controller::from_config(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_script(&mut ctl, &script, &mut out)?;

    // Final redisplay of the whole list
    ctl.clear_search();
    if json {
        let tasks = ctl
            .rows()
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let task = ctl.store().get(row.position).ok()?;
                Some(task_to_json(i + 1, task, row.text))
            })
            .collect();
        let list = TaskListJson { tasks };
        writeln!(out, "{}", serde_json::to_string_pretty(&list)?)?;
    } else {
        for line in format_rows(&ctl.rows()) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Execute every line of `script` against `ctl`, writing the output of
/// printing commands (`list`, `search`, `stop`, `elapsed`) to `out`.
pub fn run_script<W: Write>(
    ctl: &mut Controller,
    script: &str,
    out: &mut W,
) -> Result<(), ScriptError> {
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let words = split_words(raw).map_err(|e| ScriptError::Parse {
            line,
            message: e.to_string(),
        })?;
        if words.is_empty() {
            continue;
        }
        let parsed = ScriptLine::try_parse_from(&words).map_err(|e| ScriptError::Parse {
            line,
            message: clap_message(&e),
        })?;
        debug!("script line {}: {:?}", line, parsed.command);
        run_command(ctl, parsed.command, line, out)?;
    }
    Ok(())
}

fn run_command<W: Write>(
    ctl: &mut Controller,
    command: ScriptCommand,
    line: usize,
    out: &mut W,
) -> Result<(), ScriptError> {
    match command {
        ScriptCommand::Add {
            name,
            due,
            estimate,
            priority,
        } => {
            // Validate up front: a script cannot answer a re-prompt
            let due = due.unwrap_or_default();
            let estimate = estimate.unwrap_or_default();
            parse_due_date(&due).map_err(|source| ScriptError::Input { line, source })?;
            parse_estimate(&estimate).map_err(|source| ScriptError::Input { line, source })?;

            let previous = ctl.priority();
            if let Some(p) = priority {
                ctl.set_priority(p);
            }
            let mut prompter = ScriptedPrompter::new([Some(name), Some(due), Some(estimate)]);
            ctl.add_task(&mut prompter);
            ctl.set_priority(previous);
        }
        ScriptCommand::Edit { position, name } => {
            select_row(ctl, position, line)?;
            let mut prompter = ScriptedPrompter::new([Some(name)]);
            ctl.edit_task(&mut prompter);
        }
        ScriptCommand::Delete { position } => {
            select_row(ctl, position, line)?;
            ctl.delete_task();
        }
        ScriptCommand::Complete { position } => {
            select_row(ctl, position, line)?;
            ctl.complete_task();
        }
        ScriptCommand::Start { position } => {
            select_row(ctl, position, line)?;
            write_outcome(out, ctl.start_timer())?;
        }
        ScriptCommand::Stop { position } => {
            select_row(ctl, position, line)?;
            write_outcome(out, ctl.stop_timer())?;
        }
        ScriptCommand::Elapsed { position } => {
            select_row(ctl, position, line)?;
            if let Some(task) = ctl.selected_task() {
                writeln!(out, "{}", format_elapsed(task.elapsed_time()))?;
            }
        }
        ScriptCommand::Search { keyword } => {
            ctl.search(&keyword);
            for text in format_rows(&ctl.rows()) {
                writeln!(out, "{}", text)?;
            }
        }
        ScriptCommand::Sort { key } => {
            ctl.sort(key);
        }
        ScriptCommand::Priority { priority } => {
            ctl.set_priority(priority);
        }
        ScriptCommand::List => {
            for text in format_rows(&ctl.rows()) {
                writeln!(out, "{}", text)?;
            }
        }
    }
    Ok(())
}

/// Select the 1-based displayed `row`
fn select_row(ctl: &mut Controller, row: usize, line: usize) -> Result<(), ScriptError> {
    if row == 0 || !ctl.select(row - 1) {
        return Err(ScriptError::NoSuchRow { line, row });
    }
    Ok(())
}

fn write_outcome<W: Write>(out: &mut W, outcome: Outcome) -> std::io::Result<()> {
    if let Outcome::Message { body, .. } = outcome {
        writeln!(out, "{}", body)?;
    }
    Ok(())
}

/// First line of a clap error, without its `error: ` prefix
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or("invalid command");
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
