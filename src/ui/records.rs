//! Record list views

use crate::app::App;
use crate::state::{CalibrationRecord, Device, MaintenanceRecord};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn list_block(title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn draw_empty(frame: &mut Frame, area: Rect, title: &str) {
    let block = list_block(title);
    let paragraph = Paragraph::new(Line::from("No records yet — press n to create one"))
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_list(frame: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let list = List::new(items).block(list_block(title)).highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn device_item(device: &Device) -> ListItem<'static> {
    ListItem::new(format!(
        "{}  {}  [{}]  {}",
        device.serial_number,
        device.display_name(),
        device.status,
        device.location,
    ))
}

fn maintenance_item(record: &MaintenanceRecord) -> ListItem<'static> {
    ListItem::new(format!(
        "{}  {}  by {}",
        record.performed_on,
        record.device_serial,
        record.performer(),
    ))
}

fn calibration_item(record: &CalibrationRecord) -> ListItem<'static> {
    ListItem::new(format!(
        "{}  {}  at {}  cert {}",
        record.calibrated_on,
        record.device_serial,
        record.lab(),
        record.certificate_no,
    ))
}

pub fn draw_devices(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.devices.is_empty() {
        draw_empty(frame, area, " Devices ");
        return;
    }
    let items = app.state.devices.iter().map(device_item).collect();
    draw_list(frame, area, " Devices ", items, app.state.selected_device);
}

pub fn draw_maintenance(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.maintenance.is_empty() {
        draw_empty(frame, area, " Maintenance ");
        return;
    }
    let items = app.state.maintenance.iter().map(maintenance_item).collect();
    draw_list(
        frame,
        area,
        " Maintenance ",
        items,
        app.state.selected_maintenance,
    );
}

pub fn draw_calibrations(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.calibrations.is_empty() {
        draw_empty(frame, area, " Calibration ");
        return;
    }
    let items = app.state.calibrations.iter().map(calibration_item).collect();
    draw_list(
        frame,
        area,
        " Calibration ",
        items,
        app.state.selected_calibration,
    );
}
