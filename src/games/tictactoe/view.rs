//! Rendering for the tic-tac-toe screen: board grid, score panels,
//! turn status line, and the round-result popup.

use crate::games::tictactoe::logic::{Cell, Match, Player, Status};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const X_COLOR: Color = Color::Red;
const O_COLOR: Color = Color::Blue;

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3;

fn player_color(player: Player) -> Color {
    match player {
        Player::X => X_COLOR,
        Player::O => O_COLOR,
    }
}

/// Draws the full screen and returns the board rectangle, which the
/// controller keeps for mouse hit-testing.
pub fn draw(frame: &mut Frame, state: &Match, cursor: usize, show_result: bool) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(BOARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(frame.area());

    let title = Paragraph::new("TIC-TAC-TOE")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    draw_scores(frame, chunks[1], state);

    let board_area = centered(chunks[2], BOARD_WIDTH, BOARD_HEIGHT);
    draw_board(frame, board_area, state, cursor, show_result);

    draw_status(frame, chunks[3], state);

    let hints = Paragraph::new("1-9 or arrows+enter place · r next round · c clear scores · q quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, chunks[4]);

    if show_result {
        draw_result_popup(frame, state);
    }

    board_area
}

fn draw_scores(frame: &mut Frame, area: Rect, state: &Match) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (player, half) in [(Player::X, halves[0]), (Player::O, halves[1])] {
        let active = state.in_progress() && state.current() == player;
        let border_style = if active {
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let panel = Paragraph::new(state.scores().of(player).to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(player_color(player)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format!(" Player {player} ")),
            );
        frame.render_widget(panel, half);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, state: &Match, cursor: usize, show_result: bool) {
    let winning = match state.status() {
        Status::Won { line, .. } => Some(line),
        _ => None,
    };

    for idx in 0..9 {
        let rect = cell_rect(area, idx);
        let on_winning_line = winning.is_some_and(|line| line.contains(&idx));

        let mark = match state.board().cell(idx) {
            Cell::Empty => Paragraph::new(""),
            Cell::Marked(p) => {
                let style = if on_winning_line {
                    Style::default()
                        .fg(Color::Black)
                        .bg(player_color(p))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(player_color(p))
                        .add_modifier(Modifier::BOLD)
                };
                Paragraph::new(p.to_string()).style(style)
            }
        };

        let border_style = if idx == cursor && !show_result && state.in_progress() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        frame.render_widget(
            mark.alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border_style)),
            rect,
        );
    }
}

fn draw_status(frame: &mut Frame, area: Rect, state: &Match) {
    // Mirrors the scoreboard: the status line keeps showing the last
    // active player once a round ends, the popup carries the result.
    let current = state.current();
    let status = Paragraph::new(format!("Player {current}'s Turn!"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(player_color(current)));
    frame.render_widget(status, area);
}

fn draw_result_popup(frame: &mut Frame, state: &Match) {
    let text = match state.status() {
        Status::Won { winner, .. } => format!("Player {winner} Wins!"),
        Status::Draw => "It's a Draw!".to_string(),
        Status::InProgress => return,
    };

    let area = centered(frame.area(), 34, 5);
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(format!("{text}\n\n[n] next round    [esc] close"))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" ROUND OVER "),
        );
    frame.render_widget(popup, area);
}

/// Maps a terminal coordinate to a board cell index, if it lands on the
/// board drawn at `board`.
pub fn cell_at(board: Rect, column: u16, row: u16) -> Option<usize> {
    if column < board.x
        || row < board.y
        || column >= board.x + BOARD_WIDTH
        || row >= board.y + BOARD_HEIGHT
    {
        return None;
    }
    let col = ((column - board.x) / CELL_WIDTH) as usize;
    let r = ((row - board.y) / CELL_HEIGHT) as usize;
    Some(r * 3 + col)
}

fn cell_rect(board: Rect, idx: usize) -> Rect {
    Rect::new(
        board.x + (idx as u16 % 3) * CELL_WIDTH,
        board.y + (idx as u16 / 3) * CELL_HEIGHT,
        CELL_WIDTH,
        CELL_HEIGHT,
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
