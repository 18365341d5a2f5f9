use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use super::centered;
use crate::upload::UploadForm;

pub fn render(frame: &mut Frame, area: Rect, form: &UploadForm) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let box_area = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(80),
        Constraint::Fill(1),
    ])
    .split(chunks[1])[1];

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Biến tài liệu thành bài kiểm tra",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            "chỉ trong 1 giây",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            "Hỗ trợ PDF, Word, và văn bản thuần. A.I sẽ tự động phân tích và tạo bộ câu hỏi trắc nghiệm hoàn chỉnh cho bạn."
                .fg(Color::DarkGray),
        ),
        Line::from(""),
    ];

    if form.is_loading() {
        content.push(Line::from(Span::styled(
            "A.I Đang Phân Tích...",
            Style::default().fg(Color::Yellow).bold(),
        )));
        content.push(Line::from(
            "Hệ thống đang đọc và tạo bộ câu hỏi chuẩn xác...".fg(Color::DarkGray),
        ));
    } else {
        content.push(Line::from("Tải lên tài liệu của bạn (.docx, .pdf, .txt)".fg(Color::Gray)));
        content.push(Line::from(vec![
            Span::styled("Đường dẫn: ", Style::default().fg(Color::White)),
            Span::styled(form.input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]));
    }

    content.push(Line::from(""));
    match form.error() {
        Some(error) => content.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(widget, box_area);

    render_controls(frame, chunks[3], form.is_loading());

    if let Some(alert) = form.alert() {
        render_alert(frame, area, alert);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, loading: bool) {
    let text = if loading {
        "esc thoát"
    } else {
        "enter tải lên  ·  esc thoát"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered(area, 60, 7);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from("Nhấn phím bất kỳ để tiếp tục".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Red)
                .title(" Lỗi ")
                .title_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
