//! Relation resolution: relationship direction and cardinality derived from
//! field-level reference metadata.

use std::collections::HashMap;

use schema_types::{OnDelete, SchemaDefinition};

/// Cardinality of a relationship as seen from the referenced model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The referencing field is unique: at most one matching record
    OneToOne,
    /// Any number of referencing records
    OneToMany,
}

/// Which side of a reference a join starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDirection {
    /// Base records are on the referenced side; attach the referencing ones
    Inward,
    /// Base records hold the foreign key; attach the referenced record
    Outward,
}

/// One derived relationship between two models.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Model declaring the referencing field
    pub source_model: String,
    /// The referencing (foreign key) field
    pub source_field: String,
    /// Referenced model
    pub target_model: String,
    /// Referenced field (`"id"` for the implicit identifier)
    pub target_field: String,
    /// Cardinality seen from the referenced side
    pub cardinality: Cardinality,
    /// Action applied to referencing records when the referenced record is
    /// deleted
    pub on_delete: OnDelete,
}

/// Derives and caches every relationship in a finalized schema.
///
/// Relationships are pure schema facts: the resolver is computed once at
/// adapter construction and never mutated independently of the snapshot it
/// was computed from.
#[derive(Debug, Default)]
pub struct RelationResolver {
    /// Relations keyed by the model declaring the foreign key
    outward: HashMap<String, Vec<Relation>>,
    /// Relations keyed by the referenced model
    inward: HashMap<String, Vec<Relation>>,
}

impl RelationResolver {
    /// Derives all relations from a finalized schema.
    pub fn new(schema: &SchemaDefinition) -> Self {
        let mut resolver = Self::default();
        for model in schema.models() {
            for field in &model.fields {
                let Some(reference) = &field.references else {
                    continue;
                };
                let relation = Relation {
                    source_model: model.name.clone(),
                    source_field: field.name.clone(),
                    target_model: reference.model.clone(),
                    target_field: reference.field.clone(),
                    cardinality: if field.unique {
                        Cardinality::OneToOne
                    } else {
                        Cardinality::OneToMany
                    },
                    on_delete: reference.on_delete,
                };
                resolver
                    .outward
                    .entry(model.name.clone())
                    .or_default()
                    .push(relation.clone());
                resolver
                    .inward
                    .entry(reference.model.clone())
                    .or_default()
                    .push(relation);
            }
        }
        resolver
    }

    /// Relations declared by the given model (its own `references` fields).
    pub fn outward(&self, model: &str) -> &[Relation] {
        self.outward.get(model).map_or(&[], Vec::as_slice)
    }

    /// Relations pointing at the given model from other models.
    pub fn inward(&self, model: &str) -> &[Relation] {
        self.inward.get(model).map_or(&[], Vec::as_slice)
    }

    /// Resolves a join name requested on a model.
    ///
    /// An inward relation is addressed by the referencing model's key; an
    /// outward relation by the referenced model's key. The inward reading
    /// wins when one name could mean both.
    pub fn resolve_join(&self, model: &str, relation: &str) -> Option<(JoinDirection, &Relation)> {
        if let Some(found) = self
            .inward(model)
            .iter()
            .find(|r| r.source_model == relation)
        {
            return Some((JoinDirection::Inward, found));
        }
        self.outward(model)
            .iter()
            .find(|r| r.target_model == relation)
            .map(|r| (JoinDirection::Outward, r))
    }
}
