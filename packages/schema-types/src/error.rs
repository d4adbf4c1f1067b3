//! Schema construction and validation errors.

use thiserror::Error;

use crate::value::FieldType;

/// Errors raised while merging fragments or finalizing a schema.
///
/// Every structural problem surfaces at finalization, never at query time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Model defined by more than one fragment
    #[error("model '{model}' is already defined (duplicated by plugin '{plugin}')")]
    DuplicateModel { model: String, plugin: String },

    /// Field defined more than once on a model
    #[error("field '{field}' is already defined on model '{model}'")]
    DuplicateField { model: String, field: String },

    /// The implicit identifier field declared explicitly
    #[error("field name 'id' is reserved on model '{model}'")]
    ReservedFieldName { model: String },

    /// Reference to a model the schema does not define
    #[error("field '{model}.{field}' references unknown model '{target}'")]
    UnknownReferencedModel {
        model: String,
        field: String,
        target: String,
    },

    /// Reference to a field the target model does not declare
    #[error("field '{model}.{field}' references unknown field '{target_model}.{target_field}'")]
    UnknownReferencedField {
        model: String,
        field: String,
        target_model: String,
        target_field: String,
    },

    /// Referencing field type differs from the referenced field type
    #[error(
        "field '{model}.{field}' must have the type of the field it references \
         ('{target_model}.{target_field}' is {expected})"
    )]
    ReferenceTypeMismatch {
        model: String,
        field: String,
        target_model: String,
        target_field: String,
        expected: FieldType,
    },

    /// Fixed default value does not match the declared field type
    #[error("default for field '{model}.{field}' is not a {expected} value")]
    DefaultTypeMismatch {
        model: String,
        field: String,
        expected: FieldType,
    },

    /// Set-null referential action on a required field
    #[error("field '{model}.{field}' is required but its reference deletes with set-null")]
    RequiredSetNull { model: String, field: String },
}
