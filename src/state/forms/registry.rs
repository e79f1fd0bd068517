//! Name-keyed registry coordinating the fields of one form

use super::field::{FieldAccessors, FormField};
use super::validation::{FormData, ValidationErrors};

/// A field together with the accessors its widget registered
#[derive(Debug, Clone)]
pub struct RegisteredField {
    pub field: FormField,
    pub accessors: FieldAccessors,
}

/// Registry of fields for a single screen, in registration order
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    fields: Vec<RegisteredField>,
    focused: Option<usize>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field. Re-registering a name swaps its accessors and keeps the value.
    pub fn register(&mut self, field: FormField, accessors: FieldAccessors) {
        if let Some(existing) = self.position(&field.name) {
            self.fields[existing].accessors = accessors;
            return;
        }
        self.fields.push(RegisteredField { field, accessors });
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.position(name).map(|i| &self.fields[i].field)
    }

    pub fn field_at(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index).map(|r| &r.field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().map(|r| &r.field)
    }

    /// Current value as reported by the field's widget
    pub fn value(&self, name: &str) -> Option<String> {
        self.position(name).map(|i| {
            let entry = &self.fields[i];
            (entry.accessors.get)(&entry.field)
        })
    }

    /// Returns false when no field has that name
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                let entry = &mut self.fields[i];
                (entry.accessors.set)(&mut entry.field, value);
                entry.field.is_filled = !value.is_empty();
                true
            }
            None => false,
        }
    }

    /// Apply a text edit to the focused field's raw value, written back through `set`
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) -> bool {
        let Some(field) = self.focused() else {
            return false;
        };
        let name = field.name.clone();
        let mut value = field.current_value.clone();
        edit(&mut value);
        self.set_value(&name, &value)
    }

    /// Reset a field to empty, dropping any filled state
    pub fn clear(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                let entry = &mut self.fields[i];
                (entry.accessors.clear)(&mut entry.field);
                entry.field.is_filled = false;
                true
            }
            None => false,
        }
    }

    /// Collect every field's current value
    pub fn submit(&self) -> FormData {
        self.fields
            .iter()
            .map(|r| (r.field.name.clone(), (r.accessors.get)(&r.field)))
            .collect()
    }

    /// Attach per-field errors, replacing the previous set
    pub fn set_errors(&mut self, errors: &ValidationErrors) {
        let map = errors.to_field_map();
        for entry in &mut self.fields {
            entry.field.error = map.get(&entry.field.name).cloned();
        }
    }

    pub fn clear_errors(&mut self) {
        for entry in &mut self.fields {
            entry.field.error = None;
        }
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.error.as_deref())
    }

    /// Errors in registration order
    pub fn errors(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .filter_map(|r| {
                r.field
                    .error
                    .as_deref()
                    .map(|msg| (r.field.name.as_str(), msg))
            })
            .collect()
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.focused.and_then(|i| self.field_at(i))
    }

    pub fn focused_name(&self) -> Option<&str> {
        self.focused().map(|f| f.name.as_str())
    }

    pub fn focus(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.focus_index(i);
                true
            }
            None => false,
        }
    }

    /// Leaving a field marks it filled when it holds a value
    pub fn blur(&mut self) {
        if let Some(i) = self.focused.take() {
            let entry = &mut self.fields[i];
            entry.field.is_focused = false;
            entry.field.is_filled = !(entry.accessors.get)(&entry.field).is_empty();
        }
    }

    pub fn next_focus(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        let next = match self.focused {
            Some(i) => (i + 1) % self.fields.len(),
            None => 0,
        };
        self.focus_index(next);
    }

    pub fn prev_focus(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        let prev = match self.focused {
            Some(0) | None => self.fields.len() - 1,
            Some(i) => i - 1,
        };
        self.focus_index(prev);
    }

    fn focus_index(&mut self, index: usize) {
        self.blur();
        if let Some(entry) = self.fields.get_mut(index) {
            entry.field.is_focused = true;
            self.focused = Some(index);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|r| r.field.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::validation::{FieldRule, Schema};
    use pretty_assertions::assert_eq;

    fn registry() -> FormRegistry {
        let mut registry = FormRegistry::new();
        registry.register(FormField::new("neighborhood", "Bairro"), FieldAccessors::text());
        registry.register(
            FormField::with_default("cargo", "Cargo", "Professor"),
            FieldAccessors::trimmed_text(),
        );
        registry
    }

    #[test]
    fn test_submit_collects_values() {
        let mut registry = registry();
        registry.set_value("neighborhood", "Centro");
        let data = registry.submit();
        assert_eq!(data.get("neighborhood").map(String::as_str), Some("Centro"));
        assert_eq!(data.get("cargo").map(String::as_str), Some("Professor"));
    }

    #[test]
    fn test_submit_uses_registered_getter() {
        let mut registry = registry();
        registry.set_value("cargo", "  Analista  ");
        assert_eq!(registry.submit().get("cargo").map(String::as_str), Some("Analista"));
    }

    #[test]
    fn test_clear_resets_to_empty_not_default() {
        let mut registry = registry();
        assert!(registry.clear("cargo"));
        assert_eq!(registry.value("cargo").as_deref(), Some(""));
        assert!(!registry.field("cargo").unwrap().is_filled);
    }

    #[test]
    fn test_unknown_field_operations_return_false() {
        let mut registry = registry();
        assert!(!registry.set_value("missing", "x"));
        assert!(!registry.clear("missing"));
        assert!(registry.value("missing").is_none());
    }

    #[test]
    fn test_reregister_keeps_value() {
        let mut registry = registry();
        registry.set_value("neighborhood", "Centro");
        registry.register(
            FormField::new("neighborhood", "Bairro"),
            FieldAccessors::trimmed_text(),
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.value("neighborhood").as_deref(), Some("Centro"));
    }

    #[test]
    fn test_set_errors_attaches_and_replaces() {
        let mut registry = registry();
        let schema = Schema::new()
            .rule(FieldRule::required("neighborhood", "Bairro obrigatório"))
            .rule(FieldRule::required("cargo", "Cargo obrigatório"));
        registry.clear("cargo");

        let errors = schema.validate(&registry.submit()).unwrap_err();
        registry.set_errors(&errors);
        assert_eq!(
            registry.errors(),
            vec![
                ("neighborhood", "Bairro obrigatório"),
                ("cargo", "Cargo obrigatório")
            ]
        );

        registry.set_value("cargo", "Professor");
        let errors = schema.validate(&registry.submit()).unwrap_err();
        registry.set_errors(&errors);
        assert_eq!(registry.errors(), vec![("neighborhood", "Bairro obrigatório")]);
        assert!(registry.error("cargo").is_none());
    }

    #[test]
    fn test_focus_moves_between_fields() {
        let mut registry = registry();
        assert!(registry.focus("neighborhood"));
        assert_eq!(registry.focused_name(), Some("neighborhood"));
        assert!(registry.focus("cargo"));
        assert!(!registry.field("neighborhood").unwrap().is_focused);
        assert!(!registry.focus("missing"));
        assert_eq!(registry.focused_name(), Some("cargo"));
    }

    #[test]
    fn test_focus_cycles_in_registration_order() {
        let mut registry = registry();
        registry.next_focus();
        assert_eq!(registry.focused_name(), Some("neighborhood"));
        registry.next_focus();
        assert_eq!(registry.focused_name(), Some("cargo"));
        registry.next_focus();
        assert_eq!(registry.focused_name(), Some("neighborhood"));
        registry.prev_focus();
        assert_eq!(registry.focused_name(), Some("cargo"));
    }

    #[test]
    fn test_edit_focused_keeps_raw_value() {
        let mut registry = registry();
        assert!(!registry.edit_focused(|v| v.push('x')));

        registry.focus("cargo");
        registry.edit_focused(|v| v.clear());
        for c in " Analista ".chars() {
            registry.edit_focused(|v| v.push(c));
        }
        registry.edit_focused(|v| {
            v.pop();
        });
        assert_eq!(registry.field("cargo").unwrap().current_value, " Analista");
        assert_eq!(registry.value("cargo").as_deref(), Some("Analista"));
        assert!(registry.field("cargo").unwrap().is_filled);
    }

    #[test]
    fn test_blur_marks_filled() {
        let mut registry = registry();
        registry.focus("neighborhood");
        registry.edit_focused(|v| v.push('C'));
        registry.blur();
        let field = registry.field("neighborhood").unwrap();
        assert!(field.is_filled);
        assert!(!field.is_focused);
        assert!(registry.focused().is_none());
    }
}
