//! Shared fixtures: a small library schema and adapter constructors.

use std::sync::Arc;

use adapter_core::{AdapterOptions, ExperimentalOptions};
use memory_adapter::MemoryAdapter;
use schema_types::{
    define_db, FieldDefinition, FieldType, ModelDefinition, OnDelete, Reference, SchemaDefinition,
};

/// Authors with a unique one-to-one profile and any number of books.
pub fn library_schema() -> Arc<SchemaDefinition> {
    library_schema_with(OnDelete::Cascade)
}

/// Same shape with a configurable referential action on both references.
pub fn library_schema_with(on_delete: OnDelete) -> Arc<SchemaDefinition> {
    define_db(vec![
        ModelDefinition::new("author")
            .field(FieldDefinition::new("name", FieldType::String).required())
            .field(FieldDefinition::new("createdAt", FieldType::Date)),
        ModelDefinition::new("profile")
            .field(
                FieldDefinition::new("authorId", FieldType::String)
                    .unique()
                    .references(Reference::to("author", "id").on_delete(on_delete)),
            )
            .field(FieldDefinition::new("bio", FieldType::String)),
        ModelDefinition::new("book")
            .field(
                FieldDefinition::new("authorId", FieldType::String)
                    .references(Reference::to("author", "id").on_delete(on_delete)),
            )
            .field(FieldDefinition::new("title", FieldType::String).required()),
    ])
    .schema()
    .unwrap()
}

pub fn adapter() -> MemoryAdapter {
    MemoryAdapter::new(library_schema(), AdapterOptions::default())
}

pub fn adapter_without_joins() -> MemoryAdapter {
    MemoryAdapter::new(
        library_schema(),
        AdapterOptions {
            experimental: ExperimentalOptions { joins: false },
        },
    )
}
