//! Field definitions within a model.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::{FieldType, Value};

/// Referential action applied to referencing records when the record they
/// reference is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnDelete {
    /// Delete referencing records, recursively applying their own actions
    Cascade,
    /// Clear the referencing field instead of deleting the record
    SetNull,
    /// Refuse the delete while referencing records exist
    Restrict,
    /// Leave referencing records untouched (orphaned references permitted)
    #[default]
    NoAction,
}

/// Reference from a field to a field on another model.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Name of the referenced model
    pub model: String,
    /// Name of the referenced field (`"id"` for the implicit identifier)
    pub field: String,
    /// Action taken when the referenced record is deleted
    pub on_delete: OnDelete,
}

impl Reference {
    /// Creates a reference to the given model and field with no delete action.
    pub fn to(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            field: field.into(),
            on_delete: OnDelete::NoAction,
        }
    }

    /// Sets the referential action applied on delete.
    pub fn on_delete(mut self, action: OnDelete) -> Self {
        self.on_delete = action;
        self
    }
}

/// Default applied when a create omits the field.
///
/// `Generated` holds a zero-argument generator invoked once per create, so
/// two creates observe two generator invocations.
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value copied into every created record
    Fixed(Value),
    /// A generator invoked at create time
    Generated(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Produces the default value for one create.
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Fixed(value) => value.clone(),
            DefaultValue::Generated(generator) => generator(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            DefaultValue::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// Field definition within a model.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
    /// Whether a create must end up with a concrete value for this field
    pub required: bool,
    /// Whether values must be unique across the model's live records
    pub unique: bool,
    /// Default applied when a create omits the field
    pub default: Option<DefaultValue>,
    /// Optional reference to a field on another model
    pub references: Option<Reference>,
}

impl FieldDefinition {
    /// Creates a field of the given type with all flags off.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets a fixed default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Fixed(value.into()));
        self
    }

    /// Sets a generated default invoked at create time.
    pub fn default_with(mut self, generator: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(DefaultValue::Generated(Arc::new(generator)));
        self
    }

    /// Declares a reference to a field on another model.
    pub fn references(mut self, reference: Reference) -> Self {
        self.references = Some(reference);
        self
    }
}
