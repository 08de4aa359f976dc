//! tb - interactive shell over the taskbook core.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskbook::{Interpreter, Response};

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskbook")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskbook.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn default_task_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskbook")
        .join("tasks.txt")
}

/// The read/print loop. Generic over its line source and sink so it can be
/// driven by in-memory buffers in tests.
fn repl<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    interpreter: &mut Interpreter,
) -> Result<()> {
    writeln!(output, "Hello! I'm {}. What can I do for you?", "taskbook".cyan())?;
    if interpreter.skipped_on_load() > 0 {
        writeln!(
            output,
            "{} Skipped {} corrupted line(s) in the task file.",
            "!".yellow(),
            interpreter.skipped_on_load()
        )?;
    }

    let mut line = String::new();
    loop {
        write!(output, "{} ", ">".cyan())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like bye
            writeln!(output)?;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.handle(&line) {
            Response::Message(text) => writeln!(output, "{}", text)?,
            Response::Farewell(text) => {
                writeln!(output, "{}", text)?;
                break;
            }
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let path = cli.file.unwrap_or_else(default_task_file);
    info!("Opening task file: {}", path.display());

    let mut interpreter = Interpreter::open(&path)
        .with_context(|| format!("Failed to load tasks from {}", path.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl(stdin.lock(), stdout.lock(), &mut interpreter)
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
