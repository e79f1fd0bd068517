//! Declarative schema validation for submitted form data

use std::collections::BTreeMap;
use thiserror::Error;

/// Plain mapping of field name to submitted value
pub type FormData = BTreeMap<String, String>;

/// Expected shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Email,
}

impl FieldType {
    fn accepts(self, value: &str) -> bool {
        match self {
            FieldType::Text => true,
            FieldType::Integer => {
                let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
                !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
            }
            FieldType::Email => match value.split_once('@') {
                Some((local, domain)) => {
                    !local.is_empty()
                        && !domain.contains('@')
                        && domain
                            .split_once('.')
                            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                }
                None => false,
            },
        }
    }
}

/// A single rule of a schema
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub required: bool,
    pub field_type: FieldType,
    pub message: String,
}

impl FieldRule {
    /// A required text field
    pub fn required(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            required: true,
            field_type: FieldType::Text,
            message: message.to_string(),
        }
    }

    /// An optional field, only type-checked when present
    pub fn optional(field: &str, field_type: FieldType, message: &str) -> Self {
        Self {
            field: field.to_string(),
            required: false,
            field_type,
            message: message.to_string(),
        }
    }

    pub fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }
}

/// Whether validation stops at the first violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    CollectAll,
    FailFast,
}

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field_name: String,
    pub message: String,
}

/// All violations found in one validation pass, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Field name → message. The first message wins when a field has several.
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.field_name.clone())
                .or_insert_with(|| error.message.clone());
        }
        map
    }
}

/// Ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate collecting every violation
    pub fn validate(&self, data: &FormData) -> Result<(), ValidationErrors> {
        self.validate_with(data, ValidationMode::CollectAll)
    }

    pub fn validate_with(
        &self,
        data: &FormData,
        mode: ValidationMode,
    ) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        for rule in &self.rules {
            // Empty string and missing key are the same thing
            let value = data.get(&rule.field).filter(|v| !v.is_empty());

            let violated = match value {
                None => rule.required,
                Some(v) => !rule.field_type.accepts(v),
            };

            if violated {
                errors.push(ValidationError {
                    field_name: rule.field.clone(),
                    message: rule.message.clone(),
                });
                if mode == ValidationMode::FailFast {
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}
