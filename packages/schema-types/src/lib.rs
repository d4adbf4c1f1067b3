//! Schema model and plugin composition.
//!
//! This crate defines the typed value representation, field and model
//! definitions, and the builder that merges named schema fragments into one
//! finalized, validated snapshot shared by every adapter.

mod builder;
mod error;
mod field;
mod model;
mod schema;
pub(crate) mod validation;
mod value;

pub use builder::{define_db, SchemaBuilder, SchemaPlugin};
pub use error::SchemaError;
pub use field::{DefaultValue, FieldDefinition, OnDelete, Reference};
pub use model::ModelDefinition;
pub use schema::SchemaDefinition;
pub use value::{FieldType, Value};
