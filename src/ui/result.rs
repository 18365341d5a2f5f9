use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::{format_duration, option_label, truncate};
use crate::app::App;
use crate::models::Question;
use crate::review::Review;
use crate::scoring::{Grade, SCORE_SCALE, ScoreReport};

const QUESTION_PREVIEW_LENGTH: usize = 70;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let report = app.state().score.unwrap_or_else(|| app.score());

    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], &report, app.state().time_used);
    render_question_breakdown(frame, chunks[1], app, app.review());
    render_controls(frame, chunks[2]);
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Good => Color::Green,
        Grade::Fair => Color::Yellow,
        Grade::Poor => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, report: &ScoreReport, time_used: u64) {
    let color = grade_color(report.grade());

    let content = vec![
        Line::from(Span::styled(
            "KẾT QUẢ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{}", report.score, SCORE_SCALE),
            Style::default().fg(color).bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!("Đúng {}/{}", report.correct, report.total),
                Style::default().fg(Color::Green),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Sai {}", report.incorrect()),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}%", report.percentage),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            format!("Thời gian: {}", format_duration(time_used)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, review: &Review) {
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    for (index, question) in app.questions().iter().enumerate() {
        let answer = app.answers().get(&question.id).map(String::as_str);
        let is_correct = question.is_correct(answer);
        let is_cursor = index == review.cursor();
        let is_expanded = review.expanded() == Some(index);

        let (symbol, color) = if is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };
        let text_style = if is_cursor {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        if is_cursor {
            cursor_line = lines.len();
        }
        lines.push(Line::from(vec![
            Span::styled(if is_cursor { ">" } else { " " }, Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(truncate(&question.text, QUESTION_PREVIEW_LENGTH), text_style),
            Span::styled(
                if is_expanded { "  ▲" } else { "  ▼" },
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        if is_expanded {
            lines.extend(expanded_lines(question, answer));
        }
    }

    // keep the cursor row in view
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (cursor_line + 1).saturating_sub(visible);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Xem lại bài làm ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn expanded_lines<'a>(question: &'a Question, answer: Option<&str>) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("      {}", question.text),
        Style::default().fg(Color::White),
    ))];

    for (index, option) in question.options.iter().enumerate() {
        let is_right = *option == question.correct_answer;
        let is_chosen = answer == Some(option.as_str());

        let (mark, style) = match (is_right, is_chosen) {
            (true, _) => ("✓", Style::default().fg(Color::Green).bold()),
            (false, true) => ("✗", Style::default().fg(Color::Red).bold()),
            (false, false) => (" ", Style::default().fg(Color::DarkGray)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("      {} ", mark), style),
            Span::styled(format!("{}. {}", option_label(index), option), style),
        ]));
    }

    if answer.is_none() {
        lines.push(Line::from(Span::styled(
            "      (Chưa trả lời)",
            Style::default().fg(Color::Yellow),
        )));
    }

    if let Some(explanation) = &question.explanation {
        lines.push(Line::from(Span::styled(
            format!("      Giải thích: {}", explanation),
            Style::default().fg(Color::Gray).italic(),
        )));
    }

    lines.push(Line::from(""));
    lines
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k di chuyển  ·  enter xem chi tiết  ·  r làm lại bài này  ·  n tạo bài mới  ·  q thoát")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
