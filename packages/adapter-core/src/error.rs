//! Adapter operation errors.

use thiserror::Error;

/// Errors returned by adapter operations.
///
/// Every foreseeable condition is a typed variant; adapters never panic on
/// bad input. Missing records are reported as `Ok(None)` / empty results by
/// the find operations and only become [`AdapterError::NotFound`] where an
/// operation requires an existing target.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    /// Model not defined in the schema
    #[error("model '{model}' is not defined in the schema")]
    UnknownModel { model: String },

    /// Field not defined on the model
    #[error("field '{field}' is not defined on model '{model}'")]
    UnknownField { model: String, field: String },

    /// Join requested for a relation the schema does not derive
    #[error("no relation named '{relation}' exists for model '{model}'")]
    UnknownRelation { model: String, relation: String },

    /// Supplied data failed validation
    #[error("validation failed for '{model}.{field}': {reason}")]
    Validation {
        model: String,
        field: String,
        reason: String,
    },

    /// Duplicate value for a unique field
    #[error("unique constraint violated on '{model}.{field}'")]
    UniqueConstraintViolation { model: String, field: String },

    /// Restrict referential action blocked a delete
    #[error(
        "cannot delete from '{model}': restricted by referencing records in \
         '{referencing_model}.{referencing_field}'"
    )]
    ReferentialIntegrity {
        model: String,
        referencing_model: String,
        referencing_field: String,
    },

    /// Operation required an existing record and none matched
    #[error("no matching record in '{model}'")]
    NotFound { model: String },

    /// Store lock poisoned by a panicked writer
    #[error("store lock poisoned")]
    LockPoisoned,
}
