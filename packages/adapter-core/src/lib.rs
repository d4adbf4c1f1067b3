//! Uniform data-access contract for schema-driven storage backends.
//!
//! Defines the operation set every adapter implements, the record and query
//! option types those operations exchange, and the shared error taxonomy.

mod adapter;
mod error;
mod query;
mod record;

pub use adapter::{field_values, Adapter, AdapterOptions, ExperimentalOptions, FieldValues};
pub use error::AdapterError;
pub use query::{Connector, JoinSpec, Operator, Predicate, Query, SortBy, SortDirection, Where};
pub use record::{Joined, Record};
