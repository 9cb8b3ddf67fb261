//! Pure tic-tac-toe state machine. No terminal, no I/O: everything here
//! is testable without a rendered view.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Marked(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// The 8 win lines in priority order: rows, then columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 board, cells in row-major order (0-8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    pub fn is_empty(&self, idx: usize) -> bool {
        self.cells[idx].is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    fn mark(&mut self, idx: usize, player: Player) {
        self.cells[idx] = Cell::Marked(player);
    }

    /// Scans the win lines in priority order and returns the first
    /// completed one. At most one line can complete per move from a
    /// winner-free board, so the order only fixes a tie-break.
    pub fn winning_line(&self) -> Option<(Player, [usize; 3])> {
        for line in WIN_LINES {
            let [a, b, c] = line;
            if let Cell::Marked(p) = self.cells[a] {
                if self.cells[b] == Cell::Marked(p) && self.cells[c] == Cell::Marked(p) {
                    return Some((p, line));
                }
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    /// Round won; carries the completed line so the view can highlight it.
    Won { winner: Player, line: [usize; 3] },
    Draw,
}

/// Win counts per player. Survive round resets, zeroed only by an
/// explicit clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn bump(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// The whole game state: board, turn, round status, and running scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    board: Board,
    current: Player,
    status: Status,
    scores: Scores,
}

impl Match {
    /// New match: empty board, X to move, scores at zero.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Player::X,
            status: Status::InProgress,
            scores: Scores::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Player {
        self.current
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn in_progress(&self) -> bool {
        self.status == Status::InProgress
    }

    /// Marks `idx` for the current player, then evaluates the board:
    /// win bumps the winner's score, a full board is a draw, otherwise
    /// the turn switches. Moves on occupied cells or finished rounds
    /// are ignored; returns whether the move committed.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn apply_move(&mut self, idx: usize) -> bool {
        if idx >= 9 || !self.board.is_empty(idx) || !self.in_progress() {
            tracing::debug!("move rejected");
            return false;
        }

        self.board.mark(idx, self.current);

        if let Some((winner, line)) = self.board.winning_line() {
            self.status = Status::Won { winner, line };
            self.scores.bump(winner);
            tracing::info!(%winner, "round won");
        } else if self.board.is_full() {
            self.status = Status::Draw;
            tracing::info!("round drawn");
        } else {
            self.current = self.current.opponent();
        }
        true
    }

    /// Starts a new round. Whoever was current keeps the first move:
    /// the next round does not rotate the starting player. Scores are
    /// untouched.
    pub fn reset_round(&mut self) {
        self.board = Board::new();
        self.status = Status::InProgress;
        tracing::debug!(starting = %self.current, "round reset");
    }

    /// Zeroes both scores, resets the round, and forces X to start.
    pub fn clear_scores(&mut self) {
        self.scores = Scores::default();
        self.reset_round();
        self.current = Player::X;
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}
