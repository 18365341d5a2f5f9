mod quiz;
mod result;
mod setup;
mod upload;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::models::Phase;

pub use quiz::GRID_COLUMNS;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).split(area);
    render_header(frame, chunks[0], app.phase());

    match app.phase() {
        Phase::Upload => upload::render(frame, chunks[1], app.upload()),
        Phase::Config => setup::render(frame, chunks[1], app),
        Phase::Playing => quiz::render(frame, chunks[1], app),
        Phase::Result => result::render(frame, chunks[1], app),
    }
}

fn render_header(frame: &mut Frame, area: Rect, phase: Phase) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
        .horizontal_margin(1)
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("✦ ", Style::default().fg(Color::Magenta)),
        Span::styled("QuizGen AI", Style::default().fg(Color::Cyan).bold()),
    ]));
    frame.render_widget(title, chunks[0]);

    if phase != Phase::Upload {
        let hint = Paragraph::new("n · Tải file khác")
            .alignment(Alignment::Right)
            .fg(Color::DarkGray);
        frame.render_widget(hint, chunks[1]);
    }
}

/// "A".."D" for the first four options, then 1-based numbers.
fn option_label(index: usize) -> String {
    OPTION_LABELS
        .get(index)
        .map(|c| c.to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Countdown display, `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Time-used display on the result screen.
pub fn format_duration(seconds: u64) -> String {
    format!("{} phút {} giây", seconds / 60, seconds % 60)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// A box of `height` rows and `percent_x` width centered in `area`.
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
