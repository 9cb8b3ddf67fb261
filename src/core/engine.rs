use crate::{Context, Game};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::Instant;

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut last_tick = Instant::now();

        // Channel for actions the game queues from its input handlers
        let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel::<G::Action>();
        let ctx = Context { tx: action_tx };

        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (Non-blocking)
            if crossterm::event::poll(std::time::Duration::from_millis(0))? {
                match crossterm::event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if key.code == KeyCode::Char('q')
                            || (key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL))
                        {
                            break;
                        }
                        self.game.handle_key(key, &ctx);
                    }
                    Event::Mouse(mouse) => {
                        self.game.handle_mouse(mouse, &ctx);
                    }
                    _ => {}
                }
            }

            // Always wake the loop periodically so input keeps getting polled even when
            // the game does not use ticks. For games without ticks we use a small sleep
            // to avoid a tight loop while still letting input through.
            let tick_rate = self.game.tick_rate();
            let tick_sleep = tick_rate.unwrap_or(std::time::Duration::from_millis(16));
            let tick_fused = tokio::time::sleep(tick_sleep);

            tokio::select! {
                // APPLY: actions queued through the context, including delayed ones
                Some(action) = action_rx.recv() => {
                    self.game.apply(action, &ctx);
                }

                // TICK: game heartbeat
                _ = tick_fused => {
                    if tick_rate.is_some() {
                        let dt = last_tick.elapsed().as_millis() as u32;
                        last_tick = Instant::now();
                        self.game.on_tick(dt, &ctx);
                    }
                }
            }
        }

        Ok(())
    }
}
