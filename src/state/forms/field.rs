//! Form field value objects

/// One entry of a closed select list: a stable code plus a human label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Choice {
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value.to_string()),
            is_multiline: false,
        }
    }

    /// Create a new select field with no option chosen
    pub fn choice(name: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice {
                options,
                selected: None,
            },
            is_multiline: false,
        }
    }

    /// Create a new select field with an initial option chosen by code.
    /// An unknown code leaves the field unselected.
    pub fn choice_with_value(
        name: &str,
        label: &str,
        options: Vec<ChoiceOption>,
        code: &str,
    ) -> Self {
        let selected = options.iter().position(|o| o.code == code);
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice { options, selected },
            is_multiline: false,
        }
    }

    /// Get the current value as a string slice.
    ///
    /// For select fields this is the code of the chosen option, or the
    /// empty string when nothing is chosen.
    pub fn as_str(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.code.as_str())
                .unwrap_or(""),
        }
    }

    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        self.value = FieldValue::Text(value);
    }

    /// Select the option with the given code; unknown codes clear the selection
    pub fn select_code(&mut self, code: &str) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            *selected = options.iter().position(|o| o.code == code);
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Clear the field value.
    ///
    /// Text fields become the empty string; select fields lose their
    /// selection (so [`Self::as_str`] also reads as empty).
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice { selected, .. } => *selected = None,
        }
    }

    /// Whether this is a select field
    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Select the next option (wraps around). No-op on text fields.
    pub fn next_option(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            });
        }
    }

    /// Select the previous option (wraps around). No-op on text fields.
    pub fn prev_option(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        }
    }
}
