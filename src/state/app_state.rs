//! Application state definitions

use crate::state::FormState;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Devices,
    DeviceForm,
    Maintenance,
    MaintenanceForm,
    Calibration,
    CalibrationForm,
}

/// Sidebar sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Devices,
    Maintenance,
    Calibration,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Devices => "Devices",
            Self::Maintenance => "Maintenance",
            Self::Calibration => "Calibration",
        }
    }

    pub fn list_view(&self) -> View {
        match self {
            Self::Devices => View::Devices,
            Self::Maintenance => View::Maintenance,
            Self::Calibration => View::Calibration,
        }
    }

    /// Section a view belongs to (forms count as their section)
    pub fn of_view(view: &View) -> Self {
        match view {
            View::Devices | View::DeviceForm => Self::Devices,
            View::Maintenance | View::MaintenanceForm => Self::Maintenance,
            View::Calibration | View::CalibrationForm => Self::Calibration,
        }
    }

    pub fn from_config_key(key: &str) -> Option<Self> {
        match key {
            "devices" => Some(Self::Devices),
            "maintenance" => Some(Self::Maintenance),
            "calibration" => Some(Self::Calibration),
            _ => None,
        }
    }
}

/// A registered instrument
#[derive(Debug, Clone)]
pub struct Device {
    pub id: Uuid,
    pub serial_number: String,
    /// Type code; `OTHER` means the name lives in `other_name`
    pub device_type: String,
    pub other_name: String,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Device {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            serial_number: String::new(),
            device_type: String::new(),
            other_name: String::new(),
            location: String::new(),
            status: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Name shown in lists: the free-form name for `OTHER` devices, the
    /// type code otherwise
    pub fn display_name(&self) -> &str {
        if self.device_type == "OTHER" && !self.other_name.is_empty() {
            &self.other_name
        } else {
            &self.device_type
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}

/// One maintenance entry for a device
#[derive(Debug, Clone)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub device_serial: String,
    /// Performer code; `ENGINEER` fills `engineer_name`, anything else
    /// fills `organization_name`
    pub performed_by_type: String,
    pub engineer_name: String,
    pub organization_name: String,
    pub performed_on: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            device_serial: String::new(),
            performed_by_type: String::new(),
            engineer_name: String::new(),
            organization_name: String::new(),
            performed_on: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn performer(&self) -> &str {
        if self.performed_by_type == "ENGINEER" {
            &self.engineer_name
        } else {
            &self.organization_name
        }
    }
}

impl Default for MaintenanceRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// One calibration entry for a device
#[derive(Debug, Clone)]
pub struct CalibrationRecord {
    pub id: Uuid,
    pub device_serial: String,
    /// Lab code; `BOHZT` fills `lab_org`, anything else `lab_other_name`
    pub lab_choice: String,
    pub lab_org: String,
    pub lab_other_name: String,
    pub calibrated_on: String,
    pub certificate_no: String,
    pub created_at: DateTime<Utc>,
}

impl CalibrationRecord {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            device_serial: String::new(),
            lab_choice: String::new(),
            lab_org: String::new(),
            lab_other_name: String::new(),
            calibrated_on: String::new(),
            certificate_no: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn lab(&self) -> &str {
        if self.lab_choice == "BOHZT" {
            &self.lab_org
        } else {
            &self.lab_other_name
        }
    }
}

impl Default for CalibrationRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub devices: Vec<Device>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub calibrations: Vec<CalibrationRecord>,
    /// Selected row per list view
    pub selected_device: usize,
    pub selected_maintenance: usize,
    pub selected_calibration: usize,
    /// Active form, if a form view is open
    pub form: FormState,
    /// Transient message for the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Length of the list backing the current view
    pub fn current_list_len(&self) -> usize {
        match Section::of_view(&self.current_view) {
            Section::Devices => self.devices.len(),
            Section::Maintenance => self.maintenance.len(),
            Section::Calibration => self.calibrations.len(),
        }
    }

    pub fn current_selection(&self) -> usize {
        match Section::of_view(&self.current_view) {
            Section::Devices => self.selected_device,
            Section::Maintenance => self.selected_maintenance,
            Section::Calibration => self.selected_calibration,
        }
    }

    fn set_current_selection(&mut self, index: usize) {
        match Section::of_view(&self.current_view) {
            Section::Devices => self.selected_device = index,
            Section::Maintenance => self.selected_maintenance = index,
            Section::Calibration => self.selected_calibration = index,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let next = (self.current_selection() + 1).min(len - 1);
        self.set_current_selection(next);
    }

    pub fn select_prev(&mut self) {
        let current = self.current_selection();
        self.set_current_selection(current.saturating_sub(1));
    }

    /// Re-clamp the selection after a list shrank
    pub fn clamp_selection(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            self.set_current_selection(0);
        } else if self.current_selection() >= len {
            self.set_current_selection(len - 1);
        }
    }
}
