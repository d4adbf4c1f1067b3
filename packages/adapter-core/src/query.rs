//! Query options: where predicates, sorting, pagination, joins, projection.

use serde::{Deserialize, Serialize};

use schema_types::Value;

/// Comparison applied by a predicate, carrying its operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    /// Equal to the operand (`Eq(Null)` matches absent/cleared fields)
    Eq(Value),
    /// Not equal to the operand
    Ne(Value),
    /// Equal to any operand in the list
    In(Vec<Value>),
    /// Equal to none of the operands in the list
    NotIn(Vec<Value>),
    /// Strictly less than the operand
    Lt(Value),
    /// Less than or equal to the operand
    Lte(Value),
    /// Strictly greater than the operand
    Gt(Value),
    /// Greater than or equal to the operand
    Gte(Value),
    /// String field containing the operand
    Contains(String),
    /// String field starting with the operand
    StartsWith(String),
    /// String field ending with the operand
    EndsWith(String),
}

/// How a predicate combines with the running result to its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connector {
    /// Both must hold (the default)
    #[default]
    And,
    /// Either may hold
    Or,
}

/// Single predicate within a where clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field the predicate reads (`"id"` addresses the implicit identifier)
    pub field: String,
    /// Comparison and operand
    pub op: Operator,
    /// Combination with the running result; ignored on the first predicate
    pub connector: Connector,
}

/// Ordered predicate list, folded left-to-right with no grouping.
///
/// An empty clause matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Where {
    /// Predicates in evaluation order
    pub predicates: Vec<Predicate>,
}

impl Where {
    /// Creates an empty clause matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an AND-connected predicate.
    pub fn and(mut self, field: impl Into<String>, op: Operator) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            op,
            connector: Connector::And,
        });
        self
    }

    /// Appends an OR-connected predicate.
    pub fn or(mut self, field: impl Into<String>, op: Operator) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            op,
            connector: Connector::Or,
        });
        self
    }

    /// Shorthand for a clause matching one identifier.
    pub fn id(value: impl Into<String>) -> Self {
        Self::new().and("id", Operator::Eq(Value::String(value.into())))
    }

    /// Returns `true` if the clause has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

/// Single-field sort specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortBy {
    /// Field to sort on
    pub field: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortBy {
    /// Ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Request to attach one relation to the returned records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    /// Relation name: the referencing model's key for reverse relations,
    /// the referenced model's key for outward ones
    pub relation: String,
    /// For one-to-many relations, attach only the first N in table order
    pub limit: Option<usize>,
}

impl JoinSpec {
    /// Attaches every related record.
    pub fn all(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            limit: None,
        }
    }

    /// Attaches at most `limit` related records, in table order.
    pub fn limited(relation: impl Into<String>, limit: usize) -> Self {
        Self {
            relation: relation.into(),
            limit: Some(limit),
        }
    }
}

/// Options accepted by the find operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Where clause; empty matches everything
    pub filter: Where,
    /// Optional single-field sort
    pub sort: Option<SortBy>,
    /// Maximum records to return
    pub limit: Option<usize>,
    /// Records to skip before collecting results
    pub offset: Option<usize>,
    /// Relations to attach
    pub join: Vec<JoinSpec>,
    /// Fields to keep in the result; `id` is always kept
    pub select: Option<Vec<String>>,
}

impl Query {
    /// Query with only a where clause.
    pub fn filtered(filter: Where) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}
