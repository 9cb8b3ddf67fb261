//! Tic-tac-toe: pure state machine, input controller, and view.

pub mod game;
pub mod logic;
pub mod view;

pub use game::{Action, TicTacToe};
pub use logic::{Board, Cell, Match, Player, Scores, Status, WIN_LINES};
