//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{
    AppState, CalibrationForm, CalibrationRecord, Device, DeviceForm, Form, FormState,
    MaintenanceForm, MaintenanceRecord, Section, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// User configuration
    pub config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new() -> Result<Self> {
        let config = match TuiConfig::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("failed to load config, using defaults: {err:#}");
                TuiConfig::default()
            }
        };

        let mut state = AppState::default();
        if let Some(section) = config
            .default_section
            .as_deref()
            .and_then(Section::from_config_key)
        {
            state.current_view = section.list_view();
        }

        Ok(Self {
            state,
            config,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event, routed by the current view
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.state.status_message = None;

        match self.state.current_view {
            View::Devices | View::Maintenance | View::Calibration => self.handle_list_key(key)?,
            View::DeviceForm | View::MaintenanceForm | View::CalibrationForm => {
                self.handle_form_key(key)?
            }
        }
        Ok(())
    }

    /// Handle keys in the three list views
    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('1') => self.switch_section(Section::Devices),
            KeyCode::Char('2') => self.switch_section(Section::Maintenance),
            KeyCode::Char('3') => self.switch_section(Section::Calibration),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev(),
            KeyCode::Char('n') => self.open_create_form()?,
            KeyCode::Enter => self.open_edit_form()?,
            KeyCode::Char('d') => self.delete_selected(),
            _ => {}
        }
        Ok(())
    }

    /// Active form as a trait object, if a form view is open
    fn active_form_mut(&mut self) -> Option<&mut dyn Form> {
        self.state.form.as_form_mut()
    }

    /// Handle keys in the three form views
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => {
                if let Some(form) = self.active_form_mut() {
                    form.next_field();
                }
            }
            KeyCode::BackTab => {
                if let Some(form) = self.active_form_mut() {
                    form.prev_field();
                }
            }
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_form();
            }
            KeyCode::Right => self.cycle_active_choice(true),
            KeyCode::Left => self.cycle_active_choice(false),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form_input_char(c)
            }
            KeyCode::Backspace => self.form_backspace(),
            KeyCode::Enter => {
                // Enter adds a newline in multiline fields only
                self.form_input_newline();
            }
            _ => {}
        }
        Ok(())
    }

    fn switch_section(&mut self, section: Section) {
        self.state.current_view = section.list_view();
        tracing::debug!("switched to {} section", section.label());
    }

    fn open_create_form(&mut self) -> Result<()> {
        match Section::of_view(&self.state.current_view) {
            Section::Devices => {
                let form = DeviceForm::new(self.config.default_device_type.as_deref())?;
                self.state.form = FormState::Device(form);
                self.state.current_view = View::DeviceForm;
            }
            Section::Maintenance => {
                self.state.form = FormState::Maintenance(MaintenanceForm::new()?);
                self.state.current_view = View::MaintenanceForm;
            }
            Section::Calibration => {
                self.state.form = FormState::Calibration(CalibrationForm::new()?);
                self.state.current_view = View::CalibrationForm;
            }
        }
        tracing::debug!("opened create form");
        Ok(())
    }

    fn open_edit_form(&mut self) -> Result<()> {
        match Section::of_view(&self.state.current_view) {
            Section::Devices => {
                let Some(device) = self.state.devices.get(self.state.selected_device) else {
                    return Ok(());
                };
                self.state.form = FormState::Device(DeviceForm::from_device(device)?);
                self.state.current_view = View::DeviceForm;
            }
            Section::Maintenance => {
                let Some(record) = self.state.maintenance.get(self.state.selected_maintenance)
                else {
                    return Ok(());
                };
                self.state.form = FormState::Maintenance(MaintenanceForm::from_record(record)?);
                self.state.current_view = View::MaintenanceForm;
            }
            Section::Calibration => {
                let Some(record) = self.state.calibrations.get(self.state.selected_calibration)
                else {
                    return Ok(());
                };
                self.state.form = FormState::Calibration(CalibrationForm::from_record(record)?);
                self.state.current_view = View::CalibrationForm;
            }
        }
        tracing::debug!("opened edit form");
        Ok(())
    }

    /// Discard the open form and return to the section list
    fn cancel_form(&mut self) {
        let section = Section::of_view(&self.state.current_view);
        self.state.form = FormState::None;
        self.state.current_view = section.list_view();
        tracing::debug!("form cancelled");
    }

    /// Persist the open form into the in-memory record lists
    fn save_form(&mut self) {
        let form = std::mem::take(&mut self.state.form);
        match form {
            FormState::None => {}
            FormState::Device(form) => {
                match form.editing {
                    Some(id) => {
                        if let Some(device) = self.state.devices.iter_mut().find(|d| d.id == id) {
                            form.apply_to(device);
                            tracing::info!(%id, "device updated");
                            self.state.status_message = Some("Device updated".to_string());
                        }
                    }
                    None => {
                        let mut device = Device::new();
                        form.apply_to(&mut device);
                        tracing::info!(id = %device.id, "device created");
                        self.state.devices.push(device);
                        self.state.status_message = Some("Device saved".to_string());
                    }
                }
                self.state.current_view = View::Devices;
            }
            FormState::Maintenance(form) => {
                match form.editing {
                    Some(id) => {
                        if let Some(record) =
                            self.state.maintenance.iter_mut().find(|r| r.id == id)
                        {
                            form.apply_to(record);
                            tracing::info!(%id, "maintenance record updated");
                            self.state.status_message =
                                Some("Maintenance record updated".to_string());
                        }
                    }
                    None => {
                        let mut record = MaintenanceRecord::new();
                        form.apply_to(&mut record);
                        tracing::info!(id = %record.id, "maintenance record created");
                        self.state.maintenance.push(record);
                        self.state.status_message = Some("Maintenance record saved".to_string());
                    }
                }
                self.state.current_view = View::Maintenance;
            }
            FormState::Calibration(form) => {
                match form.editing {
                    Some(id) => {
                        if let Some(record) =
                            self.state.calibrations.iter_mut().find(|r| r.id == id)
                        {
                            form.apply_to(record);
                            tracing::info!(%id, "calibration record updated");
                            self.state.status_message =
                                Some("Calibration record updated".to_string());
                        }
                    }
                    None => {
                        let mut record = CalibrationRecord::new();
                        form.apply_to(&mut record);
                        tracing::info!(id = %record.id, "calibration record created");
                        self.state.calibrations.push(record);
                        self.state.status_message = Some("Calibration record saved".to_string());
                    }
                }
                self.state.current_view = View::Calibration;
            }
        }
    }

    fn delete_selected(&mut self) {
        let section = Section::of_view(&self.state.current_view);
        let removed = match section {
            Section::Devices => {
                let index = self.state.selected_device;
                (index < self.state.devices.len()).then(|| {
                    self.state.devices.remove(index);
                })
            }
            Section::Maintenance => {
                let index = self.state.selected_maintenance;
                (index < self.state.maintenance.len()).then(|| {
                    self.state.maintenance.remove(index);
                })
            }
            Section::Calibration => {
                let index = self.state.selected_calibration;
                (index < self.state.calibrations.len()).then(|| {
                    self.state.calibrations.remove(index);
                })
            }
        };
        if removed.is_some() {
            self.state.clamp_selection();
            tracing::info!("record deleted from {} list", section.label());
            self.state.status_message = Some("Record deleted".to_string());
        }
    }

    /// Cycle the active select field and run its visibility rule.
    ///
    /// This is the change event of the form: only select fields fire it,
    /// and the rule is picked by the field's name.
    fn cycle_active_choice(&mut self, forward: bool) {
        let Some(form) = self.active_form_mut() else {
            return;
        };
        let Some(input) = form.active_input() else {
            return;
        };
        let Some(field) = form.document_mut().field_mut(input) else {
            return;
        };
        if !field.is_choice() {
            return;
        }
        if forward {
            field.next_option();
        } else {
            field.prev_option();
        }
        let name = field.name.clone();
        form.field_changed(&name);
    }

    fn form_input_char(&mut self, c: char) {
        if let Some(form) = self.active_form_mut() {
            if let Some(input) = form.active_input() {
                if let Some(field) = form.document_mut().field_mut(input) {
                    field.push_char(c);
                }
            }
        }
    }

    fn form_backspace(&mut self) {
        if let Some(form) = self.active_form_mut() {
            if let Some(input) = form.active_input() {
                if let Some(field) = form.document_mut().field_mut(input) {
                    field.pop_char();
                }
            }
        }
    }

    fn form_input_newline(&mut self) {
        if let Some(form) = self.active_form_mut() {
            if let Some(input) = form.active_input() {
                if let Some(field) = form.document_mut().field_mut(input) {
                    if field.is_multiline {
                        field.push_char('\n');
                    }
                }
            }
        }
    }
}
