//! Where-clause evaluation, sorting, and pagination over record tables.

use std::cmp::Ordering;

use adapter_core::{AdapterError, Connector, Operator, Record, SortBy, SortDirection, Where};
use schema_types::{ModelDefinition, Value};

/// Checks that a field name is the implicit `id` or declared on the model.
pub(crate) fn check_field(model: &ModelDefinition, field: &str) -> Result<(), AdapterError> {
    if field == "id" || model.has_field(field) {
        return Ok(());
    }
    Err(AdapterError::UnknownField {
        model: model.name.clone(),
        field: field.to_string(),
    })
}

/// Evaluates a where clause against one record.
///
/// Predicates fold left-to-right: the running result combines with each
/// predicate through its connector (AND by default, OR when specified),
/// with no grouping. An empty clause matches every record.
pub(crate) fn eval_where(
    model: &ModelDefinition,
    record: &Record,
    filter: &Where,
) -> Result<bool, AdapterError> {
    let mut result: Option<bool> = None;
    for predicate in &filter.predicates {
        check_field(model, &predicate.field)?;
        let matched = eval_operator(&record.field_value(&predicate.field), &predicate.op);
        result = Some(match (result, predicate.connector) {
            (None, _) => matched,
            (Some(acc), Connector::And) => acc && matched,
            (Some(acc), Connector::Or) => acc || matched,
        });
    }
    Ok(result.unwrap_or(true))
}

/// Applies one operator to a record value.
///
/// Ordering operators are false on `Null` or on a type mismatch; string
/// operators are false on non-strings. `Eq(Null)` matches absent fields.
fn eval_operator(value: &Value, op: &Operator) -> bool {
    match op {
        Operator::Eq(operand) => value == operand,
        Operator::Ne(operand) => value != operand,
        Operator::In(operands) => operands.iter().any(|operand| operand == value),
        Operator::NotIn(operands) => !operands.iter().any(|operand| operand == value),
        Operator::Lt(operand) => ordered(value, operand, |o| o == Ordering::Less),
        Operator::Lte(operand) => ordered(value, operand, |o| o != Ordering::Greater),
        Operator::Gt(operand) => ordered(value, operand, |o| o == Ordering::Greater),
        Operator::Gte(operand) => ordered(value, operand, |o| o != Ordering::Less),
        Operator::Contains(needle) => value.as_str().is_some_and(|s| s.contains(needle)),
        Operator::StartsWith(prefix) => value.as_str().is_some_and(|s| s.starts_with(prefix)),
        Operator::EndsWith(suffix) => value.as_str().is_some_and(|s| s.ends_with(suffix)),
    }
}

fn ordered(value: &Value, operand: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    if value.is_null() || operand.is_null() {
        return false;
    }
    value.compare(operand).is_some_and(accept)
}

/// Sorts records on one field, stably: ties keep table insertion order.
pub(crate) fn sort_records(
    model: &ModelDefinition,
    records: &mut [Record],
    sort: &SortBy,
) -> Result<(), AdapterError> {
    check_field(model, &sort.field)?;
    records.sort_by(|a, b| {
        let ordering = a
            .field_value(&sort.field)
            .compare(&b.field_value(&sort.field))
            .unwrap_or(Ordering::Equal);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    Ok(())
}

/// Applies offset then limit.
pub(crate) fn paginate(records: Vec<Record>, offset: Option<usize>, limit: Option<usize>) -> Vec<Record> {
    records
        .into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Projects records down to the selected fields. The identifier and join
/// attachments are always kept.
pub(crate) fn apply_select(
    model: &ModelDefinition,
    records: &mut [Record],
    select: &[String],
) -> Result<(), AdapterError> {
    for field in select {
        check_field(model, field)?;
    }
    for record in records {
        record.values.retain(|name, _| select.iter().any(|s| s == name));
    }
    Ok(())
}
