//! Form domain layer
//!
//! Field registry and schema validation shared by every form screen.

mod field;
mod registry;
mod validation;

pub use field::{FieldAccessors, FormField};
pub use registry::FormRegistry;
pub use validation::{
    FieldRule, FieldType, FormData, Schema, ValidationError, ValidationErrors, ValidationMode,
};
