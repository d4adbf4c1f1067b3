//! Model definitions: a named entity type with an ordered field schema.

use crate::field::FieldDefinition;

/// Model definition: a name plus fields in declaration order.
///
/// Declaration order is preserved for generated output; querying does not
/// depend on it. The `id` field is implicit on every model and must not be
/// declared.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    /// Model name (also the table name in backends)
    pub name: String,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDefinition>,
}

impl ModelDefinition {
    /// Creates an empty model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field definition.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field definition for the given field name.
    pub fn get_field(&self, field_name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == field_name)
    }

    /// Returns `true` if the model declares the given field.
    pub fn has_field(&self, field_name: &str) -> bool {
        self.get_field(field_name).is_some()
    }
}
