//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod records;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area, status_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match &app.state.current_view {
        View::Devices => records::draw_devices(frame, main_area, app),
        View::DeviceForm => forms::draw_record_form(frame, main_area, app, " Device "),
        View::Maintenance => records::draw_maintenance(frame, main_area, app),
        View::MaintenanceForm => {
            forms::draw_record_form(frame, main_area, app, " Maintenance record ")
        }
        View::Calibration => records::draw_calibrations(frame, main_area, app),
        View::CalibrationForm => {
            forms::draw_record_form(frame, main_area, app, " Calibration record ")
        }
    }

    layout::draw_status_bar(frame, status_area, app);
}
