use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tacterm")]
#[command(about = "Two-player tic-tac-toe for the terminal")]
#[command(version)]
pub struct Cli {
    /// Milliseconds between pressing a cell and the mark landing
    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Disable mouse capture (keyboard play only)
    #[arg(long)]
    pub no_mouse: bool,

    /// Append tracing output to this file (RUST_LOG sets the filter)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
