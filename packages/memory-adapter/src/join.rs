//! Join resolution: attaching related records per schema-derived relations.

use std::collections::HashMap;

use adapter_core::{AdapterError, JoinSpec, Joined, Record};
use schema_types::Value;

use crate::relation::{Cardinality, JoinDirection, Relation, RelationResolver};
use crate::store::{records_of, Table};

/// Attaches every requested relation to the base records.
///
/// With `batched` set, each inward relation is resolved with one pass over
/// the related table; otherwise the engine falls back to one scan per base
/// record. Both paths return identical results — the flag only trades
/// lookup strategy.
pub(crate) fn attach_joins(
    tables: &HashMap<String, Table>,
    resolver: &RelationResolver,
    model: &str,
    records: &mut [Record],
    joins: &[JoinSpec],
    batched: bool,
) -> Result<(), AdapterError> {
    for spec in joins {
        let (direction, relation) =
            resolver
                .resolve_join(model, &spec.relation)
                .ok_or_else(|| AdapterError::UnknownRelation {
                    model: model.to_string(),
                    relation: spec.relation.clone(),
                })?;
        match direction {
            JoinDirection::Inward if batched => {
                attach_inward_batched(tables, relation, records, spec.limit);
            }
            JoinDirection::Inward => attach_inward_fanout(tables, relation, records, spec.limit),
            JoinDirection::Outward => attach_outward(tables, relation, records),
        }
    }
    Ok(())
}

/// Inward join resolved with a single pass over the referencing table.
fn attach_inward_batched(
    tables: &HashMap<String, Table>,
    relation: &Relation,
    records: &mut [Record],
    limit: Option<usize>,
) {
    // Group referencing records by foreign-key value, in table order.
    let mut groups: Vec<(Value, Vec<&Record>)> = Vec::new();
    for child in records_of(tables, &relation.source_model) {
        let key = child.field_value(&relation.source_field);
        if key.is_null() {
            continue;
        }
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(child),
            None => groups.push((key, vec![child])),
        }
    }

    for record in records {
        let key = record.field_value(&relation.target_field);
        let members = groups
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[]);
        record
            .joined
            .insert(relation.source_model.clone(), collect(relation, members, limit));
    }
}

/// Inward join resolved with one scan of the referencing table per base
/// record. The N+1 fallback used when in-process joins are disabled.
fn attach_inward_fanout(
    tables: &HashMap<String, Table>,
    relation: &Relation,
    records: &mut [Record],
    limit: Option<usize>,
) {
    for record in records {
        let key = record.field_value(&relation.target_field);
        let members: Vec<&Record> = records_of(tables, &relation.source_model)
            .iter()
            .filter(|child| !key.is_null() && child.field_value(&relation.source_field) == key)
            .collect();
        record
            .joined
            .insert(relation.source_model.clone(), collect(relation, &members, limit));
    }
}

fn collect(relation: &Relation, members: &[&Record], limit: Option<usize>) -> Joined {
    match relation.cardinality {
        // Absence is a null attachment, never an error.
        Cardinality::OneToOne => Joined::One(members.first().map(|r| (*r).clone())),
        Cardinality::OneToMany => Joined::Many(
            members
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(|r| (*r).clone())
                .collect(),
        ),
    }
}

/// Outward join: attach the record the base record's foreign key points at.
/// A null or dangling foreign key resolves to a null attachment.
fn attach_outward(tables: &HashMap<String, Table>, relation: &Relation, records: &mut [Record]) {
    for record in records {
        let key = record.field_value(&relation.source_field);
        let target = if key.is_null() {
            None
        } else {
            records_of(tables, &relation.target_model)
                .iter()
                .find(|candidate| candidate.field_value(&relation.target_field) == key)
                .cloned()
        };
        record
            .joined
            .insert(relation.target_model.clone(), Joined::One(target));
    }
}
