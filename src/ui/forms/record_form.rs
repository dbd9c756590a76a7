//! Record form rendering
//!
//! Only rows that are currently visible get layout space; a hidden row
//! simply does not exist on screen.

use super::field_renderer::draw_field;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the open record form into `area`
pub fn draw_record_form(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let Some(form) = app.state.form.as_form() else {
        return;
    };
    let doc = form.document();
    let visible = doc.visible_inputs();

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|id| {
            let multiline = doc.field(*id).is_some_and(|f| f.is_multiline);
            if multiline {
                Constraint::Min(5)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    constraints.push(Constraint::Min(0)); // remaining space

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (i, id) in visible.iter().enumerate() {
        if let Some(field) = doc.field(*id) {
            draw_field(frame, chunks[i], field, i == form.active_field());
        }
    }
}
