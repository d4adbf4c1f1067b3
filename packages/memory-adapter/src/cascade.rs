//! Referential actions on delete, planned before anything is removed.

use std::collections::{HashMap, HashSet};

use adapter_core::{AdapterError, Record};
use schema_types::{OnDelete, Value};

use crate::relation::RelationResolver;
use crate::store::{records_of, Table};

/// Everything one delete operation will change, computed up front.
///
/// Planning and applying are separate phases so a restrict violation
/// anywhere in the batch (or its transitive cascades) aborts with the store
/// unchanged.
#[derive(Debug, Default)]
pub(crate) struct DeletePlan {
    /// Records to remove, as (model, id)
    deletes: Vec<(String, String)>,
    /// Foreign-key fields to clear, as (model, id, field)
    set_nulls: Vec<(String, String, String)>,
}

struct RestrictCheck {
    parent_model: String,
    child_model: String,
    child_field: String,
    child_id: String,
}

/// Computes the transitive closure of a delete.
///
/// Walks inward relations from every seed record: cascade children are
/// queued for deletion (their own referential actions apply in turn),
/// set-null children are queued for a foreign-key clear, restrict children
/// are collected as constraints, no-action children are left alone. A
/// visited set over (model, id) bounds the walk on cyclic schemas.
///
/// A restrict constraint only fails the plan when the child is not itself
/// deleted by the plan: restrict protects records that would survive as
/// orphans.
pub(crate) fn plan_deletes(
    tables: &HashMap<String, Table>,
    resolver: &RelationResolver,
    model: &str,
    seeds: &[Record],
) -> Result<DeletePlan, AdapterError> {
    let mut plan = DeletePlan::default();
    let mut restricts: Vec<RestrictCheck> = Vec::new();
    let mut visited: HashSet<(String, String)> = HashSet::new();
    let mut pending: Vec<(String, Record)> = seeds
        .iter()
        .map(|record| (model.to_string(), record.clone()))
        .collect();

    while let Some((record_model, record)) = pending.pop() {
        if !visited.insert((record_model.clone(), record.id.clone())) {
            continue;
        }
        plan.deletes.push((record_model.clone(), record.id.clone()));

        for relation in resolver.inward(&record_model) {
            let key = record.field_value(&relation.target_field);
            if key.is_null() {
                continue;
            }
            let children: Vec<&Record> = records_of(tables, &relation.source_model)
                .iter()
                .filter(|child| child.field_value(&relation.source_field) == key)
                .collect();

            match relation.on_delete {
                OnDelete::Cascade => {
                    for child in children {
                        pending.push((relation.source_model.clone(), child.clone()));
                    }
                }
                OnDelete::SetNull => {
                    for child in children {
                        plan.set_nulls.push((
                            relation.source_model.clone(),
                            child.id.clone(),
                            relation.source_field.clone(),
                        ));
                    }
                }
                OnDelete::Restrict => {
                    for child in children {
                        restricts.push(RestrictCheck {
                            parent_model: record_model.clone(),
                            child_model: relation.source_model.clone(),
                            child_field: relation.source_field.clone(),
                            child_id: child.id.clone(),
                        });
                    }
                }
                OnDelete::NoAction => {}
            }
        }
    }

    let deleted: HashSet<(&str, &str)> = plan
        .deletes
        .iter()
        .map(|(m, id)| (m.as_str(), id.as_str()))
        .collect();
    for check in restricts {
        if !deleted.contains(&(check.child_model.as_str(), check.child_id.as_str())) {
            return Err(AdapterError::ReferentialIntegrity {
                model: check.parent_model,
                referencing_model: check.child_model,
                referencing_field: check.child_field,
            });
        }
    }
    plan.set_nulls
        .retain(|(m, id, _)| !deleted.contains(&(m.as_str(), id.as_str())));

    Ok(plan)
}

/// Applies a plan: removes every planned record, then clears the planned
/// foreign keys on the survivors. Insertion order of survivors is kept.
pub(crate) fn apply_plan(tables: &mut HashMap<String, Table>, plan: &DeletePlan) {
    let mut by_model: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (model, id) in &plan.deletes {
        by_model.entry(model).or_default().insert(id);
    }
    for (model, ids) in by_model {
        if let Some(table) = tables.get_mut(model) {
            table.records.retain(|record| !ids.contains(record.id.as_str()));
        }
    }
    for (model, id, field) in &plan.set_nulls {
        if let Some(table) = tables.get_mut(model.as_str()) {
            if let Some(record) = table.records.iter_mut().find(|r| &r.id == id) {
                record.values.insert(field.clone(), Value::Null);
            }
        }
    }
    tracing::debug!(
        "delete plan applied: {} records removed, {} references cleared",
        plan.deletes.len(),
        plan.set_nulls.len()
    );
}
