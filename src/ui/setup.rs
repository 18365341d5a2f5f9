use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::setup::SetupField;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.setup();
    let draft = form.draft();

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let box_area = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(64),
        Constraint::Fill(1),
    ])
    .split(chunks[1])[1];

    let file_name = app.state().file_name.as_deref().unwrap_or("");
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CẤU HÌNH BÀI THI",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(file_name.fg(Color::Gray)),
        Line::from(Span::styled(
            format!("Đã tìm thấy {} câu hỏi", app.questions().len()),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        toggle_line(
            "Đảo thứ tự câu hỏi",
            draft.shuffle_questions,
            form.field() == SetupField::ShuffleQuestions,
        ),
        toggle_line(
            "Đảo thứ tự đáp án",
            draft.shuffle_options,
            form.field() == SetupField::ShuffleOptions,
        ),
        Line::from(""),
        toggle_line(
            "Bấm giờ làm bài",
            draft.enable_timer,
            form.field() == SetupField::EnableTimer,
        ),
    ];

    if draft.enable_timer {
        let focused = form.field() == SetupField::TimeMinutes;
        let style = row_style(focused);
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(marker(focused), style),
            Span::styled("Thời gian (phút): ", style),
            Span::styled(
                format!("{}{}", form.minutes_input(), cursor),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "ENTER · BẮT ĐẦU LÀM BÀI",
        Style::default().fg(Color::Green).bold(),
    )));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(widget, box_area);

    render_controls(frame, chunks[3], draft.enable_timer);
}

fn marker(focused: bool) -> &'static str {
    if focused { " > " } else { "   " }
}

fn row_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn toggle_line(label: &str, enabled: bool, focused: bool) -> Line<'_> {
    let style = row_style(focused);
    let (check, check_color) = if enabled {
        ("[x] ", Color::Green)
    } else {
        ("[ ] ", Color::DarkGray)
    };

    Line::from(vec![
        Span::styled(marker(focused), style),
        Span::styled(check, Style::default().fg(check_color)),
        Span::styled(label, style),
    ])
}

fn render_controls(frame: &mut Frame, area: Rect, timer: bool) {
    let text = if timer {
        "j/k di chuyển  ·  space bật/tắt  ·  0-9 +/- số phút  ·  enter bắt đầu  ·  q thoát"
    } else {
        "j/k di chuyển  ·  space bật/tắt  ·  enter bắt đầu  ·  q thoát"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
