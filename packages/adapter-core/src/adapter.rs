//! The adapter trait and factory options.

use std::collections::HashMap;

use schema_types::Value;

use crate::error::AdapterError;
use crate::query::{Query, Where};
use crate::record::Record;

/// Field values supplied to create and update operations.
pub type FieldValues = HashMap<String, Value>;

/// Builds a field-value map from `(name, value)` pairs.
pub fn field_values<V, const N: usize>(entries: [(&str, V); N]) -> FieldValues
where
    V: Into<Value>,
{
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.into()))
        .collect()
}

/// The uniform operation set every storage backend implements.
///
/// Operations are computationally synchronous: no implementation may suspend
/// between reading and mutating its tables, which makes each call atomic
/// with respect to other calls on the same instance. Implementations are
/// `Send + Sync` so callers may share one adapter across concurrent tasks.
pub trait Adapter: Send + Sync {
    /// Validates and appends a record, applying defaults and generating an
    /// identifier when none is supplied.
    fn create(&self, model: &str, data: FieldValues) -> Result<Record, AdapterError>;

    /// Returns the first match (after any sort), or `None`.
    fn find_one(&self, model: &str, query: &Query) -> Result<Option<Record>, AdapterError>;

    /// Returns every match after filter, sort, pagination, and joins.
    fn find_many(&self, model: &str, query: &Query) -> Result<Vec<Record>, AdapterError>;

    /// Updates the first matching record; zero matches is
    /// [`AdapterError::NotFound`].
    fn update(&self, model: &str, filter: &Where, data: FieldValues)
        -> Result<Record, AdapterError>;

    /// Updates every matching record and returns the updated set.
    fn update_many(
        &self,
        model: &str,
        filter: &Where,
        data: FieldValues,
    ) -> Result<Vec<Record>, AdapterError>;

    /// Deletes the first matching record after propagating referential
    /// actions; zero matches is [`AdapterError::NotFound`].
    fn delete(&self, model: &str, filter: &Where) -> Result<Record, AdapterError>;

    /// Deletes every matching record as one atomic batch; returns the number
    /// of records removed from the target model.
    fn delete_many(&self, model: &str, filter: &Where) -> Result<usize, AdapterError>;

    /// Returns the number of matching records.
    fn count(&self, model: &str, filter: Option<&Where>) -> Result<usize, AdapterError>;
}

/// Options recognized by adapter factories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterOptions {
    /// Experimental behavior toggles
    pub experimental: ExperimentalOptions,
}

/// Experimental behavior toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentalOptions {
    /// When disabled, backends fall back to one lookup per base record
    /// instead of the in-process join algorithm. Both paths return
    /// identical results.
    pub joins: bool,
}

impl Default for ExperimentalOptions {
    fn default() -> Self {
        Self { joins: true }
    }
}
