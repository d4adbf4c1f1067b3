//! In-memory reference adapter.
//!
//! Implements the adapter contract over plain per-model record tables,
//! emulating relational behavior without a query engine underneath:
//! where-clause filtering, typed sorting, pagination, schema-derived join
//! resolution, and cascading referential actions on delete. The engine is a
//! correctness reference, not a production store.

mod adapter;
mod cascade;
mod join;
mod query;
mod relation;
mod store;

pub use adapter::MemoryAdapter;
pub use relation::{Cardinality, JoinDirection, Relation, RelationResolver};
pub use store::{MemoryStore, Table};
