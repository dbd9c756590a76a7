//! Form state management and form structs

use super::document::{DocumentError, FormDocument, NodeId, RowMarker};
use super::field::{ChoiceOption, FormField};
use super::visibility::{
    VisibilityController, FIELD_DEVICE_TYPE, FIELD_ENGINEER_NAME, FIELD_LAB_CHOICE, FIELD_LAB_ORG,
    FIELD_LAB_OTHER_NAME, FIELD_ORGANIZATION_NAME, FIELD_OTHER_NAME, FIELD_PERFORMED_BY_TYPE,
};
use crate::state::{CalibrationRecord, Device, MaintenanceRecord};
use uuid::Uuid;

fn device_type_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("STANDARD", "Standard instrument"),
        ChoiceOption::new("AWS", "Automatic weather station"),
        ChoiceOption::new("BAROMETER", "Barometer"),
        ChoiceOption::new("OTHER", "Other"),
    ]
}

fn device_status_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("ACTIVE", "Active"),
        ChoiceOption::new("IN_REPAIR", "In repair"),
        ChoiceOption::new("DECOMMISSIONED", "Decommissioned"),
    ]
}

fn performer_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("ENGINEER", "Station engineer"),
        ChoiceOption::new("ORGANIZATION", "Outside organization"),
    ]
}

fn lab_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("BOHZT", "National verification lab"),
        ChoiceOption::new("OTHER_LAB", "External lab"),
    ]
}

/// Trait for common form operations.
///
/// Field navigation works over the currently visible inputs, so tabbing
/// never lands on a hidden row.
pub trait Form {
    fn document(&self) -> &FormDocument;
    fn document_mut(&mut self) -> &mut FormDocument;
    fn controller(&self) -> VisibilityController;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);

    fn visible_field_count(&self) -> usize {
        self.document().visible_inputs().len()
    }

    fn next_field(&mut self) {
        let count = self.visible_field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }

    fn prev_field(&mut self) {
        let count = self.visible_field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }

    /// Node of the active (visible) input, if any
    fn active_input(&self) -> Option<NodeId> {
        self.document()
            .visible_inputs()
            .get(self.active_field())
            .copied()
    }

    /// Run the visibility rule for the named field after its value changed,
    /// then re-clamp the active index (the set of visible rows may have
    /// shrunk underneath it).
    fn field_changed(&mut self, name: &str) {
        let controller = self.controller();
        controller.handle_change(self.document_mut(), name);
        let count = self.visible_field_count();
        if count > 0 && self.active_field() >= count {
            self.set_active_field(count - 1);
        }
    }
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Device(DeviceForm),
    Maintenance(MaintenanceForm),
    Calibration(CalibrationForm),
}

impl FormState {
    pub fn as_form(&self) -> Option<&dyn Form> {
        match self {
            FormState::None => None,
            FormState::Device(f) => Some(f),
            FormState::Maintenance(f) => Some(f),
            FormState::Calibration(f) => Some(f),
        }
    }

    pub fn as_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self {
            FormState::None => None,
            FormState::Device(f) => Some(f),
            FormState::Maintenance(f) => Some(f),
            FormState::Calibration(f) => Some(f),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FormState::None)
    }
}

// Device form (create and edit)
#[derive(Debug, Clone)]
pub struct DeviceForm {
    doc: FormDocument,
    controller: VisibilityController,
    active_field_index: usize,
    /// Id of the record being edited; `None` when creating
    pub editing: Option<Uuid>,
}

impl DeviceForm {
    pub fn new(default_type: Option<&str>) -> Result<Self, DocumentError> {
        Self::build(None, "", default_type.unwrap_or(""), "", "", "ACTIVE")
    }

    pub fn from_device(device: &Device) -> Result<Self, DocumentError> {
        Self::build(
            Some(device.id),
            &device.serial_number,
            &device.device_type,
            &device.other_name,
            &device.location,
            &device.status,
        )
    }

    fn build(
        editing: Option<Uuid>,
        serial: &str,
        device_type: &str,
        other_name: &str,
        location: &str,
        status: &str,
    ) -> Result<Self, DocumentError> {
        let mut doc = FormDocument::new();
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value("serial_number", "Serial number", serial),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::choice_with_value(
                FIELD_DEVICE_TYPE,
                "Device type",
                device_type_options(),
                device_type,
            ),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value(FIELD_OTHER_NAME, "Other name", other_name),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(row, FormField::text_with_value("location", "Location", location))?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::choice_with_value("status", "Status", device_status_options(), status),
        )?;

        let mut controller = VisibilityController::new();
        controller.attach(&doc);
        controller.sync_all(&mut doc);

        Ok(Self {
            doc,
            controller,
            active_field_index: 0,
            editing,
        })
    }

    /// Copy the form values onto a record
    pub fn apply_to(&self, device: &mut Device) {
        device.serial_number = self.doc.value("serial_number").to_string();
        device.device_type = self.doc.value(FIELD_DEVICE_TYPE).to_string();
        device.other_name = self.doc.value(FIELD_OTHER_NAME).to_string();
        device.location = self.doc.value("location").to_string();
        device.status = self.doc.value("status").to_string();
    }
}

impl Form for DeviceForm {
    fn document(&self) -> &FormDocument {
        &self.doc
    }
    fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.doc
    }
    fn controller(&self) -> VisibilityController {
        self.controller
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let count = self.visible_field_count();
        self.active_field_index = index.min(count.saturating_sub(1));
    }
}

// Maintenance record form
#[derive(Debug, Clone)]
pub struct MaintenanceForm {
    doc: FormDocument,
    controller: VisibilityController,
    active_field_index: usize,
    pub editing: Option<Uuid>,
}

impl MaintenanceForm {
    pub fn new() -> Result<Self, DocumentError> {
        Self::build(None, "", "ENGINEER", "", "", "", "")
    }

    pub fn from_record(record: &MaintenanceRecord) -> Result<Self, DocumentError> {
        Self::build(
            Some(record.id),
            &record.device_serial,
            &record.performed_by_type,
            &record.engineer_name,
            &record.organization_name,
            &record.performed_on,
            &record.notes,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        editing: Option<Uuid>,
        device_serial: &str,
        performer: &str,
        engineer_name: &str,
        organization_name: &str,
        performed_on: &str,
        notes: &str,
    ) -> Result<Self, DocumentError> {
        let mut doc = FormDocument::new();
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value("device_serial", "Device serial", device_serial),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::choice_with_value(
                FIELD_PERFORMED_BY_TYPE,
                "Performed by",
                performer_options(),
                performer,
            ),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value(FIELD_ENGINEER_NAME, "Engineer name", engineer_name),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value(
                FIELD_ORGANIZATION_NAME,
                "Organization name",
                organization_name,
            ),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value("performed_on", "Performed on (YYYY-MM-DD)", performed_on),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        let mut notes_field = FormField::text("notes", "Notes", true);
        notes_field.set_text(notes.to_string());
        doc.add_input(row, notes_field)?;

        let mut controller = VisibilityController::new();
        controller.attach(&doc);
        controller.sync_all(&mut doc);

        Ok(Self {
            doc,
            controller,
            active_field_index: 0,
            editing,
        })
    }

    pub fn apply_to(&self, record: &mut MaintenanceRecord) {
        record.device_serial = self.doc.value("device_serial").to_string();
        record.performed_by_type = self.doc.value(FIELD_PERFORMED_BY_TYPE).to_string();
        record.engineer_name = self.doc.value(FIELD_ENGINEER_NAME).to_string();
        record.organization_name = self.doc.value(FIELD_ORGANIZATION_NAME).to_string();
        record.performed_on = self.doc.value("performed_on").to_string();
        record.notes = self.doc.value("notes").to_string();
    }
}

impl Form for MaintenanceForm {
    fn document(&self) -> &FormDocument {
        &self.doc
    }
    fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.doc
    }
    fn controller(&self) -> VisibilityController {
        self.controller
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let count = self.visible_field_count();
        self.active_field_index = index.min(count.saturating_sub(1));
    }
}

// Calibration record form
#[derive(Debug, Clone)]
pub struct CalibrationForm {
    doc: FormDocument,
    controller: VisibilityController,
    active_field_index: usize,
    pub editing: Option<Uuid>,
}

impl CalibrationForm {
    pub fn new() -> Result<Self, DocumentError> {
        Self::build(None, "", "BOHZT", "", "", "", "")
    }

    pub fn from_record(record: &CalibrationRecord) -> Result<Self, DocumentError> {
        Self::build(
            Some(record.id),
            &record.device_serial,
            &record.lab_choice,
            &record.lab_org,
            &record.lab_other_name,
            &record.calibrated_on,
            &record.certificate_no,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        editing: Option<Uuid>,
        device_serial: &str,
        lab_choice: &str,
        lab_org: &str,
        lab_other_name: &str,
        calibrated_on: &str,
        certificate_no: &str,
    ) -> Result<Self, DocumentError> {
        let mut doc = FormDocument::new();
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value("device_serial", "Device serial", device_serial),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::choice_with_value(
                FIELD_LAB_CHOICE,
                "Calibration lab",
                lab_options(),
                lab_choice,
            ),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value(FIELD_LAB_ORG, "Lab organization", lab_org),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value(FIELD_LAB_OTHER_NAME, "Lab name", lab_other_name),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value(
                "calibrated_on",
                "Calibrated on (YYYY-MM-DD)",
                calibrated_on,
            ),
        )?;
        let row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            row,
            FormField::text_with_value("certificate_no", "Certificate number", certificate_no),
        )?;

        let mut controller = VisibilityController::new();
        controller.attach(&doc);
        controller.sync_all(&mut doc);

        Ok(Self {
            doc,
            controller,
            active_field_index: 0,
            editing,
        })
    }

    pub fn apply_to(&self, record: &mut CalibrationRecord) {
        record.device_serial = self.doc.value("device_serial").to_string();
        record.lab_choice = self.doc.value(FIELD_LAB_CHOICE).to_string();
        record.lab_org = self.doc.value(FIELD_LAB_ORG).to_string();
        record.lab_other_name = self.doc.value(FIELD_LAB_OTHER_NAME).to_string();
        record.calibrated_on = self.doc.value("calibrated_on").to_string();
        record.certificate_no = self.doc.value("certificate_no").to_string();
    }
}

impl Form for CalibrationForm {
    fn document(&self) -> &FormDocument {
        &self.doc
    }
    fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.doc
    }
    fn controller(&self) -> VisibilityController {
        self.controller
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let count = self.visible_field_count();
        self.active_field_index = index.min(count.saturating_sub(1));
    }
}
