//! Conditional row visibility for record forms
//!
//! Each record form has a few select fields that decide which of their
//! dependent rows are shown. A hidden row's field is always cleared, so a
//! saved record never carries a value the operator could not see. All
//! missing-element cases degrade to silent no-ops: a form definition that
//! drops a field must not break the rest of the form.

use super::document::{DisplayStyle, FormDocument, NodeId, RowMarker};

/// Device type select; `OTHER` reveals the free-form name row
pub const FIELD_DEVICE_TYPE: &str = "dcub_type";
/// Free-form device name, shown only for `OTHER` devices
pub const FIELD_OTHER_NAME: &str = "other_name";
/// Maintenance performer select
pub const FIELD_PERFORMED_BY_TYPE: &str = "performed_by_type";
/// Engineer name, shown for `ENGINEER` maintenance
pub const FIELD_ENGINEER_NAME: &str = "engineer_name";
/// Organization name, shown for non-engineer maintenance
pub const FIELD_ORGANIZATION_NAME: &str = "organization_name";
/// Calibration lab select
pub const FIELD_LAB_CHOICE: &str = "lab_choice";
/// National lab organization field, shown for `BOHZT`
pub const FIELD_LAB_ORG: &str = "lab_org";
/// Free-form lab name, shown for external labs
pub const FIELD_LAB_OTHER_NAME: &str = "lab_other_name";

const DEVICE_TYPE_OTHER: &str = "OTHER";
const PERFORMER_ENGINEER: &str = "ENGINEER";
const LAB_BOHZT: &str = "BOHZT";

/// How the device gets its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceNaming {
    /// Type code is `OTHER`: the operator types a name
    FreeForm,
    /// Any other (or empty) type code: the name comes from the catalog
    Cataloged,
}

impl DeviceNaming {
    fn from_value(value: &str) -> Self {
        if value == DEVICE_TYPE_OTHER {
            DeviceNaming::FreeForm
        } else {
            DeviceNaming::Cataloged
        }
    }
}

/// Who performed the maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Performer {
    Engineer,
    /// Any other (or empty) code: an outside organization
    Organization,
}

impl Performer {
    fn from_value(value: &str) -> Self {
        if value == PERFORMER_ENGINEER {
            Performer::Engineer
        } else {
            Performer::Organization
        }
    }
}

/// Which lab ran the calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalibrationLab {
    /// The national verification lab (BOHZT)
    National,
    /// Any other (or empty) code: named free-form
    External,
}

impl CalibrationLab {
    fn from_value(value: &str) -> Self {
        if value == LAB_BOHZT {
            CalibrationLab::National
        } else {
            CalibrationLab::External
        }
    }
}

/// Drives row visibility on one form document.
///
/// The controller must be attached to a document's root before it does
/// anything; while detached every operation is a no-op. Attachment scopes
/// all field lookups to the subtree under that root.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityController {
    root: Option<NodeId>,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to a document. Replaces any previous attachment.
    pub fn attach(&mut self, doc: &FormDocument) {
        self.root = Some(doc.root());
    }

    pub fn detach(&mut self) {
        self.root = None;
    }

    pub fn is_attached(&self) -> bool {
        self.root.is_some()
    }

    /// Row container around an input: nearest `form-row` ancestor, else
    /// nearest `fieldBox` ancestor, else the input's direct parent. The
    /// order is load-bearing; markup without markers falls back to the raw
    /// parent even when that parent holds unrelated siblings.
    fn resolve_row(doc: &FormDocument, input: Option<NodeId>) -> Option<NodeId> {
        let input = input?;
        doc.closest(input, RowMarker::FormRow)
            .or_else(|| doc.closest(input, RowMarker::FieldBox))
            .or_else(|| doc.parent(input))
    }

    fn clear_field(doc: &mut FormDocument, input: Option<NodeId>) {
        if let Some(field) = input.and_then(|id| doc.field_mut(id)) {
            field.clear();
        }
    }

    /// Device rule: `dcub_type == OTHER` shows the `other_name` row and
    /// leaves its value alone; anything else hides the row and clears it.
    pub fn apply_device_rule(&self, doc: &mut FormDocument) {
        let Some(root) = self.root else { return };
        let control = doc.input_within(root, FIELD_DEVICE_TYPE);
        let other = doc.input_within(root, FIELD_OTHER_NAME);
        let other_row = Self::resolve_row(doc, other);
        let (Some(control), Some(other_row)) = (control, other_row) else {
            return;
        };

        match DeviceNaming::from_value(doc.field(control).map(|f| f.as_str()).unwrap_or("")) {
            DeviceNaming::FreeForm => doc.set_display(other_row, DisplayStyle::Default),
            DeviceNaming::Cataloged => {
                doc.set_display(other_row, DisplayStyle::None);
                Self::clear_field(doc, other);
            }
        }
    }

    /// Maintenance rule: exactly one of the engineer / organization rows is
    /// visible; the hidden one's field is cleared. Each row and field is
    /// guarded on its own, so a missing organization row still lets the
    /// engineer row toggle.
    pub fn apply_maintenance_rule(&self, doc: &mut FormDocument) {
        let Some(root) = self.root else { return };
        let Some(control) = doc.input_within(root, FIELD_PERFORMED_BY_TYPE) else {
            return;
        };
        let engineer = doc.input_within(root, FIELD_ENGINEER_NAME);
        let organization = doc.input_within(root, FIELD_ORGANIZATION_NAME);
        let engineer_row = Self::resolve_row(doc, engineer);
        let organization_row = Self::resolve_row(doc, organization);

        let performer =
            Performer::from_value(doc.field(control).map(|f| f.as_str()).unwrap_or(""));
        match performer {
            Performer::Engineer => {
                if let Some(row) = engineer_row {
                    doc.set_display(row, DisplayStyle::Default);
                }
                if let Some(row) = organization_row {
                    doc.set_display(row, DisplayStyle::None);
                }
                Self::clear_field(doc, organization);
            }
            Performer::Organization => {
                if let Some(row) = engineer_row {
                    doc.set_display(row, DisplayStyle::None);
                }
                if let Some(row) = organization_row {
                    doc.set_display(row, DisplayStyle::Default);
                }
                Self::clear_field(doc, engineer);
            }
        }
    }

    /// Calibration rule: `lab_choice == BOHZT` shows the national lab row
    /// and clears the free-form lab name; anything else does the reverse.
    pub fn apply_calibration_rule(&self, doc: &mut FormDocument) {
        let Some(root) = self.root else { return };
        let Some(control) = doc.input_within(root, FIELD_LAB_CHOICE) else {
            return;
        };
        let lab_org = doc.input_within(root, FIELD_LAB_ORG);
        let lab_other = doc.input_within(root, FIELD_LAB_OTHER_NAME);
        let lab_org_row = Self::resolve_row(doc, lab_org);
        let lab_other_row = Self::resolve_row(doc, lab_other);

        let lab = CalibrationLab::from_value(doc.field(control).map(|f| f.as_str()).unwrap_or(""));
        match lab {
            CalibrationLab::National => {
                if let Some(row) = lab_org_row {
                    doc.set_display(row, DisplayStyle::Default);
                }
                if let Some(row) = lab_other_row {
                    doc.set_display(row, DisplayStyle::None);
                }
                Self::clear_field(doc, lab_other);
            }
            CalibrationLab::External => {
                if let Some(row) = lab_org_row {
                    doc.set_display(row, DisplayStyle::None);
                }
                if let Some(row) = lab_other_row {
                    doc.set_display(row, DisplayStyle::Default);
                }
                Self::clear_field(doc, lab_org);
            }
        }
    }

    /// React to a change of the named field. Control field names are
    /// mutually exclusive, so at most one rule runs; any other name is
    /// ignored.
    pub fn handle_change(&self, doc: &mut FormDocument, name: &str) {
        if name == FIELD_DEVICE_TYPE {
            self.apply_device_rule(doc);
        }
        if name == FIELD_PERFORMED_BY_TYPE {
            self.apply_maintenance_rule(doc);
        }
        if name == FIELD_LAB_CHOICE {
            self.apply_calibration_rule(doc);
        }
    }

    /// Run every rule once, unconditionally. Called when a form is opened
    /// so pre-filled values (an edit, a reopened draft) start with the
    /// matching rows shown.
    pub fn sync_all(&self, doc: &mut FormDocument) {
        self.apply_device_rule(doc);
        self.apply_maintenance_rule(doc);
        self.apply_calibration_rule(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{ChoiceOption, FormField};
    use pretty_assertions::assert_eq;

    fn device_type_options() -> Vec<ChoiceOption> {
        vec![
            ChoiceOption::new("STANDARD", "Standard instrument"),
            ChoiceOption::new("AWS", "Automatic weather station"),
            ChoiceOption::new("OTHER", "Other"),
        ]
    }

    /// Device form fragment: control + dependent row, each its own form-row
    fn device_doc(type_code: &str, other_name: &str) -> (FormDocument, NodeId) {
        let mut doc = FormDocument::new();
        let control_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            control_row,
            FormField::choice_with_value(
                FIELD_DEVICE_TYPE,
                "Device type",
                device_type_options(),
                type_code,
            ),
        )
        .unwrap();
        let other_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            other_row,
            FormField::text_with_value(FIELD_OTHER_NAME, "Other name", other_name),
        )
        .unwrap();
        (doc, other_row)
    }

    fn maintenance_doc(performer_code: &str) -> (FormDocument, NodeId, NodeId) {
        let mut doc = FormDocument::new();
        let control_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            control_row,
            FormField::choice_with_value(
                FIELD_PERFORMED_BY_TYPE,
                "Performed by",
                vec![
                    ChoiceOption::new("ENGINEER", "Station engineer"),
                    ChoiceOption::new("ORGANIZATION", "Outside organization"),
                ],
                performer_code,
            ),
        )
        .unwrap();
        let engineer_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            engineer_row,
            FormField::text_with_value(FIELD_ENGINEER_NAME, "Engineer", "B. Dorj"),
        )
        .unwrap();
        let organization_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            organization_row,
            FormField::text_with_value(FIELD_ORGANIZATION_NAME, "Organization", "IRIMHE"),
        )
        .unwrap();
        (doc, engineer_row, organization_row)
    }

    fn calibration_doc(lab_code: &str) -> (FormDocument, NodeId, NodeId) {
        let mut doc = FormDocument::new();
        let control_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            control_row,
            FormField::choice_with_value(
                FIELD_LAB_CHOICE,
                "Calibration lab",
                vec![
                    ChoiceOption::new("BOHZT", "National verification lab"),
                    ChoiceOption::new("OTHER_LAB", "External lab"),
                ],
                lab_code,
            ),
        )
        .unwrap();
        let lab_org_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            lab_org_row,
            FormField::text_with_value(FIELD_LAB_ORG, "Lab organization", "BOHZT branch"),
        )
        .unwrap();
        let lab_other_row = doc.add_row(RowMarker::FormRow);
        doc.add_input(
            lab_other_row,
            FormField::text_with_value(FIELD_LAB_OTHER_NAME, "Lab name", "Ulaanbaatar metrology"),
        )
        .unwrap();
        (doc, lab_org_row, lab_other_row)
    }

    fn attached(doc: &FormDocument) -> VisibilityController {
        let mut controller = VisibilityController::new();
        controller.attach(doc);
        controller
    }

    mod device_rule {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_other_shows_row_and_keeps_value() {
            let (mut doc, other_row) = device_doc("OTHER", "barograph");
            attached(&doc).apply_device_rule(&mut doc);

            assert_eq!(doc.display(other_row).as_str(), "");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "barograph");
        }

        #[test]
        fn test_non_other_hides_row_and_clears_value() {
            let (mut doc, other_row) = device_doc("STANDARD", "barograph");
            attached(&doc).apply_device_rule(&mut doc);

            assert_eq!(doc.display(other_row).as_str(), "none");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "");
        }

        #[test]
        fn test_empty_value_takes_else_branch() {
            let (mut doc, other_row) = device_doc("", "barograph");
            attached(&doc).apply_device_rule(&mut doc);

            assert_eq!(doc.display(other_row).as_str(), "none");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "");
        }

        #[test]
        fn test_sentinel_is_case_sensitive() {
            let (mut doc, other_row) = device_doc("OTHER", "");
            // lowercase must not match
            if let Some(field) =
                doc.input_by_name(FIELD_DEVICE_TYPE).and_then(|id| doc.field_mut(id))
            {
                field.set_text("other".to_string());
            }
            attached(&doc).apply_device_rule(&mut doc);
            assert_eq!(doc.display(other_row).as_str(), "none");
        }

        #[test]
        fn test_missing_control_is_silent_noop() {
            let mut doc = FormDocument::new();
            let other_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                other_row,
                FormField::text_with_value(FIELD_OTHER_NAME, "Other name", "kept"),
            )
            .unwrap();

            attached(&doc).apply_device_rule(&mut doc);
            assert_eq!(doc.display(other_row).as_str(), "");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "kept");
        }

        #[test]
        fn test_missing_dependent_is_silent_noop() {
            let mut doc = FormDocument::new();
            let control_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                control_row,
                FormField::choice_with_value(
                    FIELD_DEVICE_TYPE,
                    "Device type",
                    device_type_options(),
                    "STANDARD",
                ),
            )
            .unwrap();

            attached(&doc).apply_device_rule(&mut doc);
        }

        #[test]
        fn test_idempotent_for_unchanged_value() {
            let (mut doc, other_row) = device_doc("STANDARD", "barograph");
            let controller = attached(&doc);
            controller.apply_device_rule(&mut doc);
            let after_first = (doc.display(other_row), doc.value(FIELD_OTHER_NAME).to_string());
            controller.apply_device_rule(&mut doc);
            let after_second = (doc.display(other_row), doc.value(FIELD_OTHER_NAME).to_string());
            assert_eq!(after_first, after_second);
        }
    }

    mod maintenance_rule {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_engineer_shows_engineer_hides_organization() {
            let (mut doc, engineer_row, organization_row) = maintenance_doc("ENGINEER");
            attached(&doc).apply_maintenance_rule(&mut doc);

            assert_eq!(doc.display(engineer_row).as_str(), "");
            assert_eq!(doc.display(organization_row).as_str(), "none");
            assert_eq!(doc.value(FIELD_ENGINEER_NAME), "B. Dorj");
            assert_eq!(doc.value(FIELD_ORGANIZATION_NAME), "");
        }

        #[test]
        fn test_organization_shows_organization_hides_engineer() {
            let (mut doc, engineer_row, organization_row) = maintenance_doc("ORGANIZATION");
            attached(&doc).apply_maintenance_rule(&mut doc);

            assert_eq!(doc.display(engineer_row).as_str(), "none");
            assert_eq!(doc.display(organization_row).as_str(), "");
            assert_eq!(doc.value(FIELD_ENGINEER_NAME), "");
            assert_eq!(doc.value(FIELD_ORGANIZATION_NAME), "IRIMHE");
        }

        #[test]
        fn test_unknown_value_behaves_like_organization() {
            let (mut doc, engineer_row, organization_row) = maintenance_doc("");
            attached(&doc).apply_maintenance_rule(&mut doc);

            assert_eq!(doc.display(engineer_row).as_str(), "none");
            assert_eq!(doc.display(organization_row).as_str(), "");
        }

        #[test]
        fn test_exactly_one_row_visible_for_any_value() {
            for code in ["ENGINEER", "ORGANIZATION", ""] {
                let (mut doc, engineer_row, organization_row) = maintenance_doc(code);
                attached(&doc).apply_maintenance_rule(&mut doc);

                let visible = [engineer_row, organization_row]
                    .iter()
                    .filter(|row| !doc.display(**row).is_hidden())
                    .count();
                assert_eq!(visible, 1, "performer code {code:?}");
            }
        }

        #[test]
        fn test_missing_control_is_silent_noop() {
            let mut doc = FormDocument::new();
            let engineer_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                engineer_row,
                FormField::text_with_value(FIELD_ENGINEER_NAME, "Engineer", "kept"),
            )
            .unwrap();

            attached(&doc).apply_maintenance_rule(&mut doc);
            assert_eq!(doc.display(engineer_row).as_str(), "");
            assert_eq!(doc.value(FIELD_ENGINEER_NAME), "kept");
        }

        #[test]
        fn test_missing_organization_row_still_toggles_engineer() {
            let mut doc = FormDocument::new();
            let control_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                control_row,
                FormField::text_with_value(FIELD_PERFORMED_BY_TYPE, "Performed by", "ENGINEER"),
            )
            .unwrap();
            let engineer_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                engineer_row,
                FormField::text(FIELD_ENGINEER_NAME, "Engineer", false),
            )
            .unwrap();

            attached(&doc).apply_maintenance_rule(&mut doc);
            assert_eq!(doc.display(engineer_row).as_str(), "");
        }
    }

    mod calibration_rule {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_bohzt_shows_lab_org_clears_other_name() {
            let (mut doc, lab_org_row, lab_other_row) = calibration_doc("BOHZT");
            attached(&doc).apply_calibration_rule(&mut doc);

            assert_eq!(doc.display(lab_org_row).as_str(), "");
            assert_eq!(doc.display(lab_other_row).as_str(), "none");
            assert_eq!(doc.value(FIELD_LAB_ORG), "BOHZT branch");
            assert_eq!(doc.value(FIELD_LAB_OTHER_NAME), "");
        }

        #[test]
        fn test_other_lab_shows_other_name_clears_lab_org() {
            let (mut doc, lab_org_row, lab_other_row) = calibration_doc("OTHER_LAB");
            attached(&doc).apply_calibration_rule(&mut doc);

            assert_eq!(doc.display(lab_org_row).as_str(), "none");
            assert_eq!(doc.display(lab_other_row).as_str(), "");
            assert_eq!(doc.value(FIELD_LAB_ORG), "");
            assert_eq!(doc.value(FIELD_LAB_OTHER_NAME), "Ulaanbaatar metrology");
        }

        #[test]
        fn test_empty_value_behaves_like_external_lab() {
            let (mut doc, lab_org_row, lab_other_row) = calibration_doc("");
            attached(&doc).apply_calibration_rule(&mut doc);

            assert_eq!(doc.display(lab_org_row).as_str(), "none");
            assert_eq!(doc.display(lab_other_row).as_str(), "");
        }
    }

    mod row_resolution {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_prefers_form_row_over_field_box() {
            let mut doc = FormDocument::new();
            let control_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                control_row,
                FormField::text_with_value(FIELD_DEVICE_TYPE, "Device type", "STANDARD"),
            )
            .unwrap();
            // other_name sits in a fieldBox nested inside a form-row
            let outer = doc.add_row(RowMarker::FormRow);
            let field_box = doc.add_container(outer, Some(RowMarker::FieldBox));
            doc.add_input(
                field_box,
                FormField::text(FIELD_OTHER_NAME, "Other name", false),
            )
            .unwrap();

            attached(&doc).apply_device_rule(&mut doc);
            // the form-row wins over the nearer fieldBox
            assert_eq!(doc.display(outer).as_str(), "none");
            assert_eq!(doc.display(field_box).as_str(), "");
        }

        #[test]
        fn test_falls_back_to_field_box() {
            let mut doc = FormDocument::new();
            let control_box = doc.add_row(RowMarker::FieldBox);
            doc.add_input(
                control_box,
                FormField::text_with_value(FIELD_DEVICE_TYPE, "Device type", "STANDARD"),
            )
            .unwrap();
            let other_box = doc.add_row(RowMarker::FieldBox);
            doc.add_input(
                other_box,
                FormField::text(FIELD_OTHER_NAME, "Other name", false),
            )
            .unwrap();

            attached(&doc).apply_device_rule(&mut doc);
            assert_eq!(doc.display(other_box).as_str(), "none");
        }

        #[test]
        fn test_falls_back_to_direct_parent_and_over_hides_siblings() {
            // unmarked markup: the parent container holds an unrelated
            // sibling, which goes hidden with it (source behavior, kept)
            let mut doc = FormDocument::new();
            let control_row = doc.add_row(RowMarker::FormRow);
            doc.add_input(
                control_row,
                FormField::text_with_value(FIELD_DEVICE_TYPE, "Device type", "STANDARD"),
            )
            .unwrap();
            let plain = doc.add_container(doc.root(), None);
            let other = doc
                .add_input(plain, FormField::text(FIELD_OTHER_NAME, "Other name", false))
                .unwrap();
            let sibling = doc
                .add_input(plain, FormField::text("notes", "Notes", true))
                .unwrap();

            attached(&doc).apply_device_rule(&mut doc);
            assert_eq!(doc.display(plain).as_str(), "none");
            assert!(!doc.is_visible(other));
            assert!(!doc.is_visible(sibling));
        }
    }

    mod dispatch {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_change_dispatches_to_matching_rule_only() {
            let (mut doc, other_row) = device_doc("STANDARD", "barograph");
            let controller = attached(&doc);

            controller.handle_change(&mut doc, FIELD_OTHER_NAME);
            assert_eq!(doc.display(other_row).as_str(), "");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "barograph");

            controller.handle_change(&mut doc, FIELD_DEVICE_TYPE);
            assert_eq!(doc.display(other_row).as_str(), "none");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "");
        }

        #[test]
        fn test_change_requires_exact_name() {
            let (mut doc, other_row) = device_doc("STANDARD", "barograph");
            let controller = attached(&doc);

            controller.handle_change(&mut doc, "dcub_type ");
            controller.handle_change(&mut doc, "DCUB_TYPE");
            assert_eq!(doc.display(other_row).as_str(), "");
        }

        #[test]
        fn test_detached_controller_does_nothing() {
            let (mut doc, other_row) = device_doc("STANDARD", "barograph");
            let mut controller = attached(&doc);
            controller.detach();
            assert!(!controller.is_attached());

            controller.handle_change(&mut doc, FIELD_DEVICE_TYPE);
            controller.sync_all(&mut doc);
            assert_eq!(doc.display(other_row).as_str(), "");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "barograph");
        }

        #[test]
        fn test_sync_all_runs_every_rule() {
            // one document holding all three rule groups
            let mut doc = FormDocument::new();
            for (name, value) in [
                (FIELD_DEVICE_TYPE, "STANDARD"),
                (FIELD_OTHER_NAME, "x"),
                (FIELD_PERFORMED_BY_TYPE, "ENGINEER"),
                (FIELD_ENGINEER_NAME, "B. Dorj"),
                (FIELD_ORGANIZATION_NAME, "y"),
                (FIELD_LAB_CHOICE, "BOHZT"),
                (FIELD_LAB_ORG, "z"),
                (FIELD_LAB_OTHER_NAME, "w"),
            ] {
                let row = doc.add_row(RowMarker::FormRow);
                doc.add_input(row, FormField::text_with_value(name, name, value))
                    .unwrap();
            }

            let mut controller = VisibilityController::new();
            controller.attach(&doc);
            controller.sync_all(&mut doc);

            assert_eq!(doc.value(FIELD_OTHER_NAME), "");
            assert_eq!(doc.value(FIELD_ENGINEER_NAME), "B. Dorj");
            assert_eq!(doc.value(FIELD_ORGANIZATION_NAME), "");
            assert_eq!(doc.value(FIELD_LAB_ORG), "z");
            assert_eq!(doc.value(FIELD_LAB_OTHER_NAME), "");
        }

        #[test]
        fn test_prefilled_other_then_standard_end_to_end() {
            // open the form with OTHER pre-filled, then switch the type
            let (mut doc, other_row) = device_doc("OTHER", "barograph");
            let mut controller = VisibilityController::new();
            controller.attach(&doc);
            controller.sync_all(&mut doc);

            assert_eq!(doc.display(other_row).as_str(), "");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "barograph");

            if let Some(field) = doc
                .input_by_name(FIELD_DEVICE_TYPE)
                .and_then(|id| doc.field_mut(id))
            {
                field.select_code("STANDARD");
            }
            controller.handle_change(&mut doc, FIELD_DEVICE_TYPE);

            assert_eq!(doc.display(other_row).as_str(), "none");
            assert_eq!(doc.value(FIELD_OTHER_NAME), "");
        }
    }
}
