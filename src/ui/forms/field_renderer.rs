//! Field rendering utilities for forms

use crate::state::{FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match &field.value {
        FieldValue::Choice { .. } => choice_line(field, is_active, style),
        FieldValue::Text(_) => text_content(field, is_active, style),
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Select fields render their current option between cycle arrows
fn choice_line(field: &FormField, is_active: bool, style: Style) -> Paragraph<'static> {
    let display_value = field.display_value();
    let display_str = if display_value.is_empty() {
        "(none)".to_string()
    } else {
        display_value
    };

    let line = if is_active {
        Line::from(vec![
            Span::styled("◂ ", Style::default().fg(Color::Cyan)),
            Span::styled(display_str, style),
            Span::styled(" ▸", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(Span::styled(display_str, style))
    };
    Paragraph::new(line)
}

fn text_content(field: &FormField, is_active: bool, style: Style) -> Paragraph<'static> {
    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    }
}
