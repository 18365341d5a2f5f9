use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap},
};

use super::{centered, format_clock, option_label};
use crate::app::App;
use crate::player::Player;

/// Cells per row in the question grid.
pub const GRID_COLUMNS: usize = 10;

/// Countdown turns red below this many seconds.
const LOW_TIME_SECS: u64 = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(player) = app.player() else {
        return;
    };
    let Some(question) = player.current_question() else {
        let waiting = Paragraph::new("Không có câu hỏi nào")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], player);
    render_progress(frame, chunks[1], player);
    render_question_text(frame, chunks[2], &question.text);
    render_options(
        frame,
        chunks[3],
        &question.options,
        player.highlighted_option(),
        player.selected_answer(player.current_index()),
    );
    render_controls(frame, chunks[4], player.is_last());

    if let Some(cursor) = player.grid_cursor() {
        render_grid(frame, area, player, cursor);
    }
}

fn render_status(frame: &mut Frame, area: Rect, player: &Player) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(12)]).split(area);

    let position = Paragraph::new(format!(
        "Câu {}/{}",
        player.current_index() + 1,
        player.total()
    ))
    .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(position, chunks[0]);

    if let Some(left) = player.time_left() {
        let color = if left < LOW_TIME_SECS {
            Color::Red
        } else {
            Color::White
        };
        let timer = Paragraph::new(format!("⏱ {}", format_clock(left)))
            .alignment(Alignment::Right)
            .style(Style::default().fg(color).bold());
        frame.render_widget(timer, chunks[1]);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, player: &Player) {
    let label = format!("Đã làm {}/{}", player.answered_count(), player.total());
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(player.progress_percent().min(100))
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    highlighted: usize,
    selected: Option<&str>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_highlighted = index == highlighted;
        let is_selected = selected == Some(option.as_str());

        let style = match (is_selected, is_highlighted) {
            (true, _) => Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
            (false, true) => Style::default().fg(Color::Cyan).bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_highlighted { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {}. ", option_label(index)), style),
            Span::styled(format!("{} ", option), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Đáp án ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, is_last: bool) {
    let text = if is_last {
        "j/k chọn  ·  enter/a-d trả lời  ·  h trước  ·  g danh sách  ·  s NỘP BÀI  ·  q thoát"
    } else {
        "j/k chọn  ·  enter/a-d trả lời  ·  h/l trước/tiếp  ·  g danh sách  ·  s nộp bài  ·  q thoát"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn render_grid(frame: &mut Frame, area: Rect, player: &Player, cursor: usize) {
    let rows = player.total().div_ceil(GRID_COLUMNS).max(1);
    let popup = centered(area, 60, rows as u16 + 4);

    let lines: Vec<Line> = (0..rows)
        .map(|row| {
            let start = row * GRID_COLUMNS;
            let end = (start + GRID_COLUMNS).min(player.total());
            let cells: Vec<Span> = (start..end)
                .map(|index| {
                    let mut style = if player.is_answered(index) {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    if index == player.current_index() {
                        style = style.underlined().bold();
                    }
                    if index == cursor {
                        style = style.reversed();
                    }
                    Span::styled(format!(" {:>3} ", index + 1), style)
                })
                .collect();
            Line::from(cells)
        })
        .collect();

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Cyan)
            .title(" Danh sách câu hỏi · enter chuyển tới · g đóng ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::vertical(1)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
