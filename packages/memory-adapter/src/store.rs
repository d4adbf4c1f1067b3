//! Store container: one insertion-ordered record table per model.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use adapter_core::{AdapterError, Record};

/// Insertion-ordered record table for one model.
///
/// Insertion order is the deterministic tiebreak for unbounded joins and for
/// queries without an explicit sort.
#[derive(Debug, Default)]
pub struct Table {
    /// Records in insertion order
    pub(crate) records: Vec<Record>,
}

impl Table {
    /// Returns the records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Process-local backing store shared by adapter instances.
///
/// Tables are addressable only through an adapter bound to this store;
/// every operation takes the store lock once for its whole duration, so a
/// cascade spanning several tables is atomic with respect to other
/// operations. Tables materialize on first write; a model with no records
/// yet reads as an empty table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<String, Table>>, AdapterError> {
        self.tables.read().map_err(|_| AdapterError::LockPoisoned)
    }

    pub(crate) fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<String, Table>>, AdapterError> {
        self.tables.write().map_err(|_| AdapterError::LockPoisoned)
    }

    /// Returns the names of tables that have been written to, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, AdapterError> {
        let tables = self.read()?;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Returns the number of records currently stored for a model.
    pub fn record_count(&self, model: &str) -> Result<usize, AdapterError> {
        let tables = self.read()?;
        Ok(tables.get(model).map_or(0, Table::len))
    }
}

/// Looks up a model's records inside a locked table map.
pub(crate) fn records_of<'a>(tables: &'a HashMap<String, Table>, model: &str) -> &'a [Record] {
    tables.get(model).map_or(&[], |table| table.records())
}
