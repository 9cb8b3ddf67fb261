//! Input handling and action flow for the tic-tac-toe screen.

use crate::core::game::{Context, Game};
use crate::games::tictactoe::logic::Match;
use crate::games::tictactoe::view;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Land the mark at a cell after the placement delay.
    Commit(usize),
    NextRound,
    ClearScores,
    DismissResult,
}

pub struct TicTacToe {
    state: Match,
    cursor: usize,
    show_result: bool,
    place_delay: Duration,
    // Board rectangle from the last draw, for mouse hit-testing
    board_area: Option<Rect>,
}

impl TicTacToe {
    pub fn new(place_delay: Duration) -> Self {
        Self {
            state: Match::new(),
            cursor: 4,
            show_result: false,
            place_delay,
            board_area: None,
        }
    }

    pub fn state(&self) -> &Match {
        &self.state
    }

    /// Press on a cell: validate now, land the mark after the delay.
    /// `Commit` re-validates through `apply_move`, so a second press on
    /// the same cell is rejected once the first one commits.
    fn press(&mut self, idx: usize, ctx: &Context<Action>) {
        if self.show_result || !self.state.in_progress() || !self.state.board().is_empty(idx) {
            return;
        }
        ctx.send_action_after(Action::Commit(idx), self.place_delay);
    }

    fn move_cursor(&mut self, key: KeyCode) {
        let (col, row) = (self.cursor % 3, self.cursor / 3);
        let (col, row) = match key {
            KeyCode::Left => (col.saturating_sub(1), row),
            KeyCode::Right => ((col + 1).min(2), row),
            KeyCode::Up => (col, row.saturating_sub(1)),
            KeyCode::Down => (col, (row + 1).min(2)),
            _ => (col, row),
        };
        self.cursor = row * 3 + col;
    }
}

impl Game for TicTacToe {
    type Action = Action;

    fn handle_key(&mut self, key: KeyEvent, ctx: &Context<Action>) {
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                self.cursor = idx;
                self.press(idx, ctx);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.move_cursor(key.code);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.press(self.cursor, ctx),
            KeyCode::Char('r') => ctx.send_action(Action::NextRound),
            KeyCode::Char('n') if self.show_result => ctx.send_action(Action::NextRound),
            KeyCode::Char('c') => ctx.send_action(Action::ClearScores),
            KeyCode::Esc => ctx.send_action(Action::DismissResult),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &Context<Action>) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(area) = self.board_area {
            if let Some(idx) = view::cell_at(area, mouse.column, mouse.row) {
                self.cursor = idx;
                self.press(idx, ctx);
            }
        }
    }

    fn apply(&mut self, action: Action, _ctx: &Context<Action>) {
        match action {
            Action::Commit(idx) => {
                if self.state.apply_move(idx) && !self.state.in_progress() {
                    self.show_result = true;
                }
            }
            Action::NextRound => {
                self.state.reset_round();
                self.show_result = false;
            }
            Action::ClearScores => {
                self.state.clear_scores();
                self.show_result = false;
            }
            Action::DismissResult => self.show_result = false,
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        self.board_area = Some(view::draw(
            frame,
            &self.state,
            self.cursor,
            self.show_result,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::logic::{Player, Scores, Status};
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn ctx() -> (Context<Action>, UnboundedReceiver<Action>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Context { tx }, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn commit(game: &mut TicTacToe, idx: usize) {
        let (c, _rx) = ctx();
        game.apply(Action::Commit(idx), &c);
    }

    #[test]
    fn test_commit_places_mark_and_switches_turn() {
        let mut game = TicTacToe::new(Duration::ZERO);
        commit(&mut game, 4);
        assert_eq!(game.state().current(), Player::O);
        assert!(!game.state().board().is_empty(4));
    }

    #[test]
    fn test_duplicate_commit_is_rejected() {
        // Two rapid presses on the same cell both schedule commits; the
        // second must bounce off the now-occupied cell.
        let mut game = TicTacToe::new(Duration::ZERO);
        commit(&mut game, 4);
        let before = game.state().clone();
        commit(&mut game, 4);
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_winning_commit_shows_result() {
        let mut game = TicTacToe::new(Duration::ZERO);
        for idx in [0, 3, 1, 4, 2] {
            commit(&mut game, idx);
        }
        assert!(game.show_result);
        assert_eq!(
            game.state().status(),
            Status::Won {
                winner: Player::X,
                line: [0, 1, 2]
            }
        );
    }

    #[test]
    fn test_next_round_dismisses_result() {
        let mut game = TicTacToe::new(Duration::ZERO);
        for idx in [0, 3, 1, 4, 2] {
            commit(&mut game, idx);
        }
        let (c, _rx) = ctx();
        game.apply(Action::NextRound, &c);
        assert!(!game.show_result);
        assert!(game.state().in_progress());
        assert_eq!(game.state().scores(), Scores { x: 1, o: 0 });
    }

    #[test]
    fn test_clear_scores_action() {
        let mut game = TicTacToe::new(Duration::ZERO);
        for idx in [0, 3, 1, 4, 2] {
            commit(&mut game, idx);
        }
        let (c, _rx) = ctx();
        game.apply(Action::ClearScores, &c);
        assert_eq!(game.state().scores(), Scores { x: 0, o: 0 });
        assert_eq!(game.state().current(), Player::X);
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut game = TicTacToe::new(Duration::ZERO);
        let (c, _rx) = ctx();
        for _ in 0..5 {
            game.handle_key(key(KeyCode::Left), &c);
            game.handle_key(key(KeyCode::Up), &c);
        }
        assert_eq!(game.cursor, 0);
        for _ in 0..5 {
            game.handle_key(key(KeyCode::Right), &c);
            game.handle_key(key(KeyCode::Down), &c);
        }
        assert_eq!(game.cursor, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_number_key_schedules_commit() {
        let mut game = TicTacToe::new(Duration::from_millis(50));
        let (c, mut rx) = ctx();
        game.handle_key(key(KeyCode::Char('5')), &c);
        let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("commit should arrive after the delay");
        assert_eq!(action, Some(Action::Commit(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_on_occupied_cell_schedules_nothing() {
        let mut game = TicTacToe::new(Duration::from_millis(50));
        commit(&mut game, 4);
        let (c, mut rx) = ctx();
        game.handle_key(key(KeyCode::Char('5')), &c);
        let result = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err(), "occupied cell must not schedule a commit");
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_while_result_shown_schedules_nothing() {
        let mut game = TicTacToe::new(Duration::from_millis(50));
        for idx in [0, 3, 1, 4, 2] {
            commit(&mut game, idx);
        }
        let (c, mut rx) = ctx();
        game.handle_key(key(KeyCode::Char('6')), &c);
        let result = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err());
    }
}
