//! Records exchanged through the adapter contract.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use schema_types::Value;

/// Related records attached to a base record by a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Joined {
    /// One-to-one relation: the single related record, or `None`
    One(Option<Record>),
    /// One-to-many relation: related records in table order
    Many(Vec<Record>),
}

/// Record instance of a model.
///
/// A flat mapping of field name to value plus the implicit `id`. Join
/// attachments are owned copies of related records; a record in one table is
/// never aliased by another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Implicit identifier
    pub id: String,
    /// Field values by field name
    pub values: HashMap<String, Value>,
    /// Join attachments by relation name; empty unless a join was requested
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub joined: HashMap<String, Joined>,
}

impl Record {
    /// Creates a record with the given identifier and field values.
    pub fn new(id: impl Into<String>, values: HashMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            values,
            joined: HashMap::new(),
        }
    }

    /// Returns the stored value for a declared field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Returns the value seen by queries for any field name, including the
    /// implicit `id`. Absent fields read as `Null`.
    pub fn field_value(&self, field: &str) -> Value {
        if field == "id" {
            Value::String(self.id.clone())
        } else {
            self.values.get(field).cloned().unwrap_or(Value::Null)
        }
    }

    /// Returns the single record attached for a one-to-one relation.
    pub fn joined_one(&self, relation: &str) -> Option<&Record> {
        match self.joined.get(relation) {
            Some(Joined::One(record)) => record.as_ref(),
            _ => None,
        }
    }

    /// Returns the records attached for a one-to-many relation.
    pub fn joined_many(&self, relation: &str) -> Option<&[Record]> {
        match self.joined.get(relation) {
            Some(Joined::Many(records)) => Some(records),
            _ => None,
        }
    }

    /// Converts the record to a JSON object, join attachments included.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("id".to_string(), serde_json::Value::String(self.id.clone()));
        for (name, value) in &self.values {
            object.insert(name.clone(), value.to_json());
        }
        for (name, joined) in &self.joined {
            let value = match joined {
                Joined::One(None) => serde_json::Value::Null,
                Joined::One(Some(record)) => record.to_json(),
                Joined::Many(records) => {
                    serde_json::Value::Array(records.iter().map(Record::to_json).collect())
                }
            };
            object.insert(name.clone(), value);
        }
        serde_json::Value::Object(object)
    }
}
