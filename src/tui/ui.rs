//! Stateless rendering of both boards.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use super::app::App;
use crate::games::wordle::{Board, Cell, GameView, LetterColor, TeamNumber};
use crate::render_loop::{Notice, RenderLoop};

/// Draws the main UI.
pub fn draw(frame: &mut Frame, app: &App, render_loop: &RenderLoop) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(15),   // Boards
            Constraint::Length(3), // Guess entry
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    let title = match render_loop.view() {
        Some(view) if view.is_game_over() => "Town Wordle - Game Over",
        _ => "Town Wordle",
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    match render_loop.view() {
        Some(view) => draw_boards(frame, chunks[1], view),
        None => {
            let waiting = Paragraph::new("Waiting for game state...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(waiting, chunks[1]);
        }
    }

    let entry = format!("{:_<5}", app.input());
    let entry = Paragraph::new(entry)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Guess (Enter: submit | Esc: quit)"),
        );
    frame.render_widget(entry, chunks[2]);

    let (status, style) = status_line(app, render_loop);
    let status = Paragraph::new(status)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[3]);
}

fn draw_boards(frame: &mut Frame, area: Rect, view: &GameView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (team, column) in TeamNumber::iter().zip(columns.iter()) {
        let title = if view.observer_team() == Some(team) {
            format!("{} (you)", team)
        } else {
            team.to_string()
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let board = Paragraph::new(board_lines(view.board(team)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(board, *column);
    }
}

fn board_lines(board: &Board) -> Vec<Line<'static>> {
    board
        .rows()
        .iter()
        .flat_map(|row| {
            let cells: Vec<Span<'static>> = row
                .iter()
                .flat_map(|cell| [cell_span(cell), Span::raw(" ")])
                .collect();
            [Line::from(cells), Line::default()]
        })
        .collect()
}

fn cell_span(cell: &Cell) -> Span<'static> {
    let text = match (cell.letter(), cell.is_filled()) {
        (Some(letter), _) => format!(" {} ", letter),
        // Hidden letters keep their color but show no glyph.
        (None, true) => "   ".to_string(),
        (None, false) => " _ ".to_string(),
    };
    Span::styled(text, cell_style(cell.color()))
}

fn cell_style(color: Option<LetterColor>) -> Style {
    match color {
        Some(LetterColor::Correct) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(LetterColor::Displaced) => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Some(LetterColor::Absent) => Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    }
}

fn status_line(app: &App, render_loop: &RenderLoop) -> (String, Style) {
    if let Some(hint) = app.hint() {
        return (hint.to_string(), Style::default().fg(Color::Yellow));
    }
    match render_loop.notice() {
        Some(notice @ Notice::Refresh(_)) => (
            notice.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(notice @ Notice::Request(_)) => (notice.to_string(), Style::default().fg(Color::Red)),
        Some(notice @ Notice::GuessAccepted(_)) => {
            (notice.to_string(), Style::default().fg(Color::Green))
        }
        None => (
            format!("Watching as {}", render_loop.observer()),
            Style::default().fg(Color::DarkGray),
        ),
    }
}
