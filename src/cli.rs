//! CLI argument parsing for the tb shell.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tb",
    about = "A personal task tracker with flat-file persistence",
    version,
    after_help = "Logs are written to: ~/.local/share/taskbook/logs/taskbook.log"
)]
pub struct Cli {
    /// Path to the task file (default: platform data directory)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}
