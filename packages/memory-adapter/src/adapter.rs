//! The in-memory adapter: factory, validation, and the operation set.

use std::sync::Arc;

use adapter_core::{
    Adapter, AdapterError, AdapterOptions, FieldValues, Query, Record, Where,
};
use schema_types::{FieldDefinition, ModelDefinition, SchemaDefinition, Value};
use uuid::Uuid;

use crate::cascade;
use crate::join;
use crate::query;
use crate::relation::RelationResolver;
use crate::store::{records_of, MemoryStore};

/// Reference adapter over [`MemoryStore`] tables.
///
/// Binds a finalized schema and adapter options to a concrete instance.
/// There is no ambient global state: a fresh store is created per adapter
/// unless one is passed explicitly to [`MemoryAdapter::with_store`].
pub struct MemoryAdapter {
    schema: Arc<SchemaDefinition>,
    resolver: RelationResolver,
    options: AdapterOptions,
    store: Arc<MemoryStore>,
}

impl MemoryAdapter {
    /// Binds the schema and options to a fresh backing store.
    pub fn new(schema: Arc<SchemaDefinition>, options: AdapterOptions) -> Self {
        Self::with_store(schema, options, Arc::new(MemoryStore::new()))
    }

    /// Binds the schema and options to an explicitly shared backing store,
    /// letting several adapter instances address the same tables.
    pub fn with_store(
        schema: Arc<SchemaDefinition>,
        options: AdapterOptions,
        store: Arc<MemoryStore>,
    ) -> Self {
        let resolver = RelationResolver::new(&schema);
        Self {
            schema,
            resolver,
            options,
            store,
        }
    }

    /// Returns the schema snapshot this adapter was built from.
    pub fn schema(&self) -> &Arc<SchemaDefinition> {
        &self.schema
    }

    /// Returns a handle to the backing store.
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    fn model(&self, name: &str) -> Result<&ModelDefinition, AdapterError> {
        self.schema
            .get_model(name)
            .ok_or_else(|| AdapterError::UnknownModel {
                model: name.to_string(),
            })
    }

    /// Validates update data: no identifier writes, declared fields only,
    /// matching types, and no clearing of required fields.
    fn check_update_data(
        &self,
        model: &ModelDefinition,
        data: &FieldValues,
    ) -> Result<(), AdapterError> {
        for (name, value) in data {
            if name == "id" {
                return Err(AdapterError::Validation {
                    model: model.name.clone(),
                    field: name.clone(),
                    reason: "the identifier is immutable".to_string(),
                });
            }
            let field = model
                .get_field(name)
                .ok_or_else(|| AdapterError::UnknownField {
                    model: model.name.clone(),
                    field: name.clone(),
                })?;
            check_type(model, field, value)?;
            if field.required && value.is_null() {
                return Err(AdapterError::Validation {
                    model: model.name.clone(),
                    field: name.clone(),
                    reason: "required field cannot be cleared".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn check_type(
    model: &ModelDefinition,
    field: &FieldDefinition,
    value: &Value,
) -> Result<(), AdapterError> {
    if value.matches_type(field.field_type) {
        return Ok(());
    }
    Err(AdapterError::Validation {
        model: model.name.clone(),
        field: field.name.clone(),
        reason: format!("expected a {} value", field.field_type),
    })
}

/// Checks the candidate against live rows: the identifier and every unique
/// field must not collide. `exclude` skips the row being updated; `Null`
/// never conflicts.
fn check_unique(
    model: &ModelDefinition,
    records: &[Record],
    candidate: &Record,
    exclude: Option<&str>,
) -> Result<(), AdapterError> {
    let others = || {
        records
            .iter()
            .filter(|other| exclude != Some(other.id.as_str()))
    };
    if others().any(|other| other.id == candidate.id) {
        return Err(AdapterError::UniqueConstraintViolation {
            model: model.name.clone(),
            field: "id".to_string(),
        });
    }
    for field in model.fields.iter().filter(|f| f.unique) {
        let value = candidate.field_value(&field.name);
        if value.is_null() {
            continue;
        }
        if others().any(|other| other.field_value(&field.name) == value) {
            return Err(AdapterError::UniqueConstraintViolation {
                model: model.name.clone(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

impl Adapter for MemoryAdapter {
    fn create(&self, model: &str, data: FieldValues) -> Result<Record, AdapterError> {
        let def = self.model(model)?;
        let mut data = data;

        let id = match data.remove("id") {
            None => Uuid::new_v4().to_string(),
            Some(Value::String(id)) => id,
            Some(_) => {
                return Err(AdapterError::Validation {
                    model: model.to_string(),
                    field: "id".to_string(),
                    reason: "the identifier must be a string".to_string(),
                })
            }
        };

        for (name, value) in &data {
            let field = def
                .get_field(name)
                .ok_or_else(|| AdapterError::UnknownField {
                    model: model.to_string(),
                    field: name.clone(),
                })?;
            check_type(def, field, value)?;
        }

        // Defaults fill omitted fields; a generated default is produced per
        // create and still has to type-check.
        let mut values = data;
        for field in &def.fields {
            if values.contains_key(&field.name) {
                continue;
            }
            if let Some(default) = &field.default {
                let value = default.produce();
                check_type(def, field, &value)?;
                values.insert(field.name.clone(), value);
            }
        }

        for field in &def.fields {
            if field.required && values.get(&field.name).map_or(true, Value::is_null) {
                return Err(AdapterError::Validation {
                    model: model.to_string(),
                    field: field.name.clone(),
                    reason: "missing required value".to_string(),
                });
            }
        }

        let record = Record::new(id, values);

        let mut tables = self.store.write()?;
        check_unique(def, records_of(&tables, model), &record, None)?;
        tables
            .entry(model.to_string())
            .or_default()
            .records
            .push(record.clone());
        tracing::debug!("created record {} in '{}'", record.id, model);
        Ok(record)
    }

    fn find_one(&self, model: &str, query: &Query) -> Result<Option<Record>, AdapterError> {
        let mut first = query.clone();
        first.limit = Some(1);
        Ok(self.find_many(model, &first)?.into_iter().next())
    }

    fn find_many(&self, model: &str, query_opts: &Query) -> Result<Vec<Record>, AdapterError> {
        let def = self.model(model)?;
        let tables = self.store.read()?;

        let mut matches = Vec::new();
        for record in records_of(&tables, model) {
            if query::eval_where(def, record, &query_opts.filter)? {
                matches.push(record.clone());
            }
        }
        if let Some(sort) = &query_opts.sort {
            query::sort_records(def, &mut matches, sort)?;
        }
        let mut matches = query::paginate(matches, query_opts.offset, query_opts.limit);
        if !query_opts.join.is_empty() {
            join::attach_joins(
                &tables,
                &self.resolver,
                model,
                &mut matches,
                &query_opts.join,
                self.options.experimental.joins,
            )?;
        }
        if let Some(select) = &query_opts.select {
            query::apply_select(def, &mut matches, select)?;
        }
        Ok(matches)
    }

    fn update(
        &self,
        model: &str,
        filter: &Where,
        data: FieldValues,
    ) -> Result<Record, AdapterError> {
        let def = self.model(model)?;
        self.check_update_data(def, &data)?;

        let mut tables = self.store.write()?;
        let records = records_of(&tables, model);
        let mut target = None;
        for (index, record) in records.iter().enumerate() {
            if query::eval_where(def, record, filter)? {
                target = Some(index);
                break;
            }
        }
        let Some(index) = target else {
            return Err(AdapterError::NotFound {
                model: model.to_string(),
            });
        };

        let mut updated = records[index].clone();
        for (name, value) in &data {
            updated.values.insert(name.clone(), value.clone());
        }
        check_unique(def, records, &updated, Some(updated.id.as_str()))?;

        if let Some(table) = tables.get_mut(model) {
            table.records[index] = updated.clone();
        }
        tracing::debug!("updated record {} in '{}'", updated.id, model);
        Ok(updated)
    }

    fn update_many(
        &self,
        model: &str,
        filter: &Where,
        data: FieldValues,
    ) -> Result<Vec<Record>, AdapterError> {
        let def = self.model(model)?;
        self.check_update_data(def, &data)?;

        let mut tables = self.store.write()?;
        let records = records_of(&tables, model);
        let mut indices = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if query::eval_where(def, record, filter)? {
                indices.push(index);
            }
        }
        if indices.is_empty() {
            return Ok(Vec::new());
        }

        // Batch rule: writing one non-null value to a unique field across
        // more than one match is a violation by construction. The whole
        // batch is validated before anything is mutated.
        if indices.len() > 1 {
            if let Some(field) = def
                .fields
                .iter()
                .find(|f| f.unique && data.get(&f.name).is_some_and(|v| !v.is_null()))
            {
                return Err(AdapterError::UniqueConstraintViolation {
                    model: model.to_string(),
                    field: field.name.clone(),
                });
            }
        }

        let mut updates = Vec::with_capacity(indices.len());
        for &index in &indices {
            let mut updated = records[index].clone();
            for (name, value) in &data {
                updated.values.insert(name.clone(), value.clone());
            }
            check_unique(def, records, &updated, Some(updated.id.as_str()))?;
            updates.push((index, updated));
        }

        if let Some(table) = tables.get_mut(model) {
            for (index, updated) in &updates {
                table.records[*index] = updated.clone();
            }
        }
        tracing::debug!("updated {} records in '{}'", updates.len(), model);
        Ok(updates.into_iter().map(|(_, updated)| updated).collect())
    }

    fn delete(&self, model: &str, filter: &Where) -> Result<Record, AdapterError> {
        let def = self.model(model)?;
        let mut tables = self.store.write()?;

        let mut seed = None;
        for record in records_of(&tables, model) {
            if query::eval_where(def, record, filter)? {
                seed = Some(record.clone());
                break;
            }
        }
        let Some(seed) = seed else {
            return Err(AdapterError::NotFound {
                model: model.to_string(),
            });
        };

        let plan = cascade::plan_deletes(&tables, &self.resolver, model, std::slice::from_ref(&seed))?;
        cascade::apply_plan(&mut tables, &plan);
        tracing::debug!("deleted record {} from '{}'", seed.id, model);
        Ok(seed)
    }

    fn delete_many(&self, model: &str, filter: &Where) -> Result<usize, AdapterError> {
        let def = self.model(model)?;
        let mut tables = self.store.write()?;

        let mut seeds = Vec::new();
        for record in records_of(&tables, model) {
            if query::eval_where(def, record, filter)? {
                seeds.push(record.clone());
            }
        }
        if seeds.is_empty() {
            return Ok(0);
        }

        // The batch is planned as one unit: a restrict constraint anywhere
        // aborts before any record is removed.
        let plan = cascade::plan_deletes(&tables, &self.resolver, model, &seeds)?;
        cascade::apply_plan(&mut tables, &plan);
        tracing::debug!("deleted {} records from '{}'", seeds.len(), model);
        Ok(seeds.len())
    }

    fn count(&self, model: &str, filter: Option<&Where>) -> Result<usize, AdapterError> {
        let def = self.model(model)?;
        let tables = self.store.read()?;
        let mut count = 0;
        for record in records_of(&tables, model) {
            let matched = match filter {
                Some(filter) => query::eval_where(def, record, filter)?,
                None => true,
            };
            if matched {
                count += 1;
            }
        }
        Ok(count)
    }
}
