//! Typed field values and the field type union.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field types supported by the schema.
///
/// Each variant is a closed member of the type system: validation and sort
/// comparison match on it exhaustively, so adding a type is a compile-checked
/// change everywhere values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit floating point number
    Number,
    /// Boolean value
    Boolean,
    /// UTC timestamp
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Date => write!(f, "date"),
        }
    }
}

/// Value representation for record fields.
///
/// Holds any value corresponding to a [`FieldType`] variant, plus `Null` for
/// optional fields that are unset (for example after a set-null referential
/// action).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent / cleared value
    Null,
    /// UTF-8 string
    String(String),
    /// 64-bit floating point number
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// UTC timestamp
    Date(DateTime<Utc>),
}

impl Value {
    /// Returns the field type of this value, or `None` for `Null`.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(FieldType::String),
            Value::Number(_) => Some(FieldType::Number),
            Value::Bool(_) => Some(FieldType::Boolean),
            Value::Date(_) => Some(FieldType::Date),
        }
    }

    /// Returns `true` if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value can be stored in a field of the given
    /// type. `Null` is accepted for any type; the required check is a
    /// separate concern.
    pub fn matches_type(&self, field_type: FieldType) -> bool {
        match self.field_type() {
            None => true,
            Some(ty) => ty == field_type,
        }
    }

    /// Returns the string content if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compares two values of the same type.
    ///
    /// Ordering semantics per type: strings lexicographic, numbers numeric,
    /// dates chronological, booleans false before true. `Null` orders before
    /// any concrete value. Values of different types are incomparable and
    /// return `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Converts this value to a JSON value. Dates render as RFC 3339 strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::json!(n),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Date(d) => serde_json::Value::String(d.to_rfc3339()),
        }
    }

    /// Parses a JSON value into a typed value for the given field type.
    ///
    /// Returns `None` when the JSON value does not fit the field type.
    /// Dates are parsed from RFC 3339 strings.
    pub fn from_json(json: &serde_json::Value, field_type: FieldType) -> Option<Value> {
        match (json, field_type) {
            (serde_json::Value::Null, _) => Some(Value::Null),
            (serde_json::Value::String(s), FieldType::String) => Some(Value::String(s.clone())),
            (serde_json::Value::Number(n), FieldType::Number) => n.as_f64().map(Value::Number),
            (serde_json::Value::Bool(b), FieldType::Boolean) => Some(Value::Bool(*b)),
            (serde_json::Value::String(s), FieldType::Date) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|d| Value::Date(d.with_timezone(&Utc))),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}
