//! Core game interface for the tacterm engine.

use std::time::Duration;

use crossterm::event::{KeyEvent, MouseEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Handle games use to feed actions back into the engine loop.
///
/// Actions sent here are applied on the loop task, so input handlers
/// never mutate game state directly.
pub struct Context<A> {
    pub(crate) tx: UnboundedSender<A>,
}

impl<A: Send + 'static> Context<A> {
    /// Queues an action for the next pass of the engine loop.
    pub fn send_action(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Queues an action after a delay. Used for animation sequencing;
    /// the receiving `apply` must re-validate, since the game may have
    /// moved on by the time the action lands.
    pub fn send_action_after(&self, action: A, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(action);
        });
    }
}

/// Main trait a game implements to run under the engine.
pub trait Game {
    /// Action type delivered through the [`Context`] channel.
    type Action: Send + 'static;

    /// Translate a key press into actions or local UI state changes.
    fn handle_key(&mut self, event: KeyEvent, ctx: &Context<Self::Action>);

    /// Translate a mouse event into actions. Optional; keyboard-only
    /// games ignore it.
    fn handle_mouse(&mut self, _event: MouseEvent, _ctx: &Context<Self::Action>) {}

    /// Apply an action to the game state.
    fn apply(&mut self, action: Self::Action, ctx: &Context<Self::Action>);

    /// Fixed heartbeat interval, if the game wants ticks.
    fn tick_rate(&self) -> Option<Duration> {
        None
    }

    /// Called once per tick when `tick_rate` returns an interval.
    fn on_tick(&mut self, _dt: u32, _ctx: &Context<Self::Action>) {}

    /// Render the current state. Takes `&mut self` so games can cache
    /// layout rectangles for mouse hit-testing.
    fn render(&mut self, frame: &mut ratatui::Frame);
}
