//! Form field value objects

/// Reads the value a widget currently holds
pub type GetValue = fn(&FormField) -> String;
/// Writes a value into the widget
pub type SetValue = fn(&mut FormField, &str);
/// Resets the widget to empty
pub type ClearValue = fn(&mut FormField);

/// The three operations a widget exposes to the form registry
#[derive(Clone, Copy)]
pub struct FieldAccessors {
    pub get: GetValue,
    pub set: SetValue,
    pub clear: ClearValue,
}

impl FieldAccessors {
    /// Accessors for a free-text input
    pub fn text() -> Self {
        Self {
            get: |field| field.current_value.clone(),
            set: |field, value| field.current_value = value.to_string(),
            clear: |field| field.current_value.clear(),
        }
    }

    /// Accessors for a text input that trims surrounding whitespace on read
    pub fn trimmed_text() -> Self {
        Self {
            get: |field| field.current_value.trim().to_string(),
            ..Self::text()
        }
    }
}

impl std::fmt::Debug for FieldAccessors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessors").finish_non_exhaustive()
    }
}

impl Default for FieldAccessors {
    fn default() -> Self {
        Self::text()
    }
}

/// Represents a single form field with its value and display state
#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub current_value: String,
    pub default_value: String,
    pub is_focused: bool,
    pub is_filled: bool,
    pub error: Option<String>,
}

impl FormField {
    /// Create a new empty field
    pub fn new(name: &str, label: &str) -> Self {
        Self::with_default(name, label, "")
    }

    /// Create a new field starting at `default_value`
    pub fn with_default(name: &str, label: &str, default_value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            current_value: default_value.to_string(),
            default_value: default_value.to_string(),
            is_focused: false,
            is_filled: !default_value.is_empty(),
            error: None,
        }
    }

    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }
}
