use anyhow::Result;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use std::time::Duration;
use tacterm::cli::Cli;
use tacterm::core::engine::Engine;
use tacterm::games::tictactoe::TicTacToe;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to a file: stderr would draw over the alternate screen
    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let game = TicTacToe::new(Duration::from_millis(cli.delay_ms));

    let terminal = ratatui::init();
    if !cli.no_mouse {
        crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    }

    let result = Engine::new(game).run(terminal).await;

    if !cli.no_mouse {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    result
}
