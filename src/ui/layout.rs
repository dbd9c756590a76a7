//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::Section;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar sections with their shortcut keys
const SIDEBAR_ITEMS: &[(&str, Section)] = &[
    ("1", Section::Devices),
    ("2", Section::Maintenance),
    ("3", Section::Calibration),
];

/// Create the main layout: sidebar, main content, status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(rows[0]);

    (columns[0], columns[1], rows[1])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(BUTTON_HEIGHT), // Devices
            Constraint::Length(BUTTON_HEIGHT), // Maintenance
            Constraint::Length(BUTTON_HEIGHT), // Calibration
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    let current = Section::of_view(&app.state.current_view);
    for (idx, (key, section)) in SIDEBAR_ITEMS.iter().enumerate() {
        render_sidebar_button(
            frame,
            chunks[idx + 1],
            key,
            section.label(),
            *section == current,
        );
    }
}

/// Draw the bottom status bar: a transient message when set, otherwise the
/// key hints for the current view
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(message) = &app.state.status_message {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Green),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    if !app.config.show_hints() {
        return;
    }

    let in_form = !app.state.form.is_none();
    let hints: &[(&str, &str)] = if in_form {
        &[
            ("Tab", "next field"),
            ("←/→", "change option"),
            ("Ctrl+S", "save"),
            ("Esc", "cancel"),
        ]
    } else {
        &[
            ("1-3", "section"),
            ("j/k", "select"),
            ("n", "new"),
            ("Enter", "edit"),
            ("d", "delete"),
            ("q", "quit"),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
