//! Integration tests for the memory adapter.
//!
//! Exercises the full adapter surface the way a caller would: schema
//! definition through the builder, then CRUD, queries, joins, and
//! referential actions against one store.

mod common;

mod cascade_tests;
mod query_tests;
