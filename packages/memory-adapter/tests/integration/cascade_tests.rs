//! Referential actions on delete: cascade, set-null, restrict, no-action.

use adapter_core::{field_values, Adapter, AdapterError, JoinSpec, Operator, Query, Where};
use memory_adapter::MemoryAdapter;
use schema_types::{OnDelete, Value};

use crate::common::library_schema_with;

fn adapter_with(on_delete: OnDelete) -> MemoryAdapter {
    MemoryAdapter::new(library_schema_with(on_delete), Default::default())
}

fn seed(db: &dyn Adapter) -> String {
    let author = db.create("author", field_values([("name", "Ada")])).unwrap();
    db.create(
        "profile",
        field_values([
            ("authorId", Value::from(author.id.as_str())),
            ("bio", Value::from("bio")),
        ]),
    )
    .unwrap();
    for i in 0..3 {
        db.create(
            "book",
            field_values([
                ("authorId", Value::from(author.id.as_str())),
                ("title", Value::from(format!("Volume {i}"))),
            ]),
        )
        .unwrap();
    }
    author.id
}

fn referencing_count(db: &dyn Adapter, model: &str, author_id: &str) -> usize {
    db.count(
        model,
        Some(&Where::new().and("authorId", Operator::Eq(Value::from(author_id)))),
    )
    .unwrap()
}

#[test]
fn test_cascade_removes_referencing_records() {
    let db = adapter_with(OnDelete::Cascade);
    let author_id = seed(&db);

    db.delete("author", &Where::id(author_id.clone())).unwrap();

    assert_eq!(db.count("author", None).unwrap(), 0);
    assert_eq!(referencing_count(&db, "profile", &author_id), 0);
    assert_eq!(referencing_count(&db, "book", &author_id), 0);
}

#[test]
fn test_restrict_blocks_delete_and_keeps_all_rows() {
    let db = adapter_with(OnDelete::Restrict);
    let author_id = seed(&db);

    let err = db.delete("author", &Where::id(author_id.clone())).unwrap_err();
    assert!(matches!(err, AdapterError::ReferentialIntegrity { .. }));

    // Everything is unchanged: author and all referencing children remain.
    assert_eq!(db.count("author", None).unwrap(), 1);
    assert_eq!(referencing_count(&db, "profile", &author_id), 1);
    assert_eq!(referencing_count(&db, "book", &author_id), 3);
}

#[test]
fn test_restrict_allows_delete_once_children_gone() {
    let db = adapter_with(OnDelete::Restrict);
    let author_id = seed(&db);

    db.delete_many(
        "book",
        &Where::new().and("authorId", Operator::Eq(Value::from(author_id.as_str()))),
    )
    .unwrap();
    db.delete(
        "profile",
        &Where::new().and("authorId", Operator::Eq(Value::from(author_id.as_str()))),
    )
    .unwrap();

    db.delete("author", &Where::id(author_id)).unwrap();
    assert_eq!(db.count("author", None).unwrap(), 0);
}

#[test]
fn test_set_null_clears_foreign_key() {
    let db = adapter_with(OnDelete::SetNull);
    let author_id = seed(&db);

    db.delete("author", &Where::id(author_id.clone())).unwrap();

    // Children survive with their reference cleared.
    assert_eq!(db.count("book", None).unwrap(), 3);
    assert_eq!(referencing_count(&db, "book", &author_id), 0);
    assert_eq!(
        db.count(
            "book",
            Some(&Where::new().and("authorId", Operator::Eq(Value::Null)))
        )
        .unwrap(),
        3
    );
}

#[test]
fn test_no_action_leaves_orphans() {
    let db = adapter_with(OnDelete::NoAction);
    let author_id = seed(&db);

    db.delete("author", &Where::id(author_id.clone())).unwrap();

    // Orphaned references are permitted and resolve to null on join.
    assert_eq!(referencing_count(&db, "book", &author_id), 3);
    let books = db
        .find_many(
            "book",
            &Query {
                join: vec![JoinSpec::all("author")],
                ..Query::default()
            },
        )
        .unwrap();
    for book in books {
        assert!(book.joined_one("author").is_none());
    }
}

#[test]
fn test_delete_many_restrict_aborts_whole_batch() {
    let db = adapter_with(OnDelete::Restrict);

    // Two authors: one clean, one with a referencing book.
    let clean = db.create("author", field_values([("name", "Clean")])).unwrap();
    let blocked = db.create("author", field_values([("name", "Blocked")])).unwrap();
    db.create(
        "book",
        field_values([
            ("authorId", Value::from(blocked.id.as_str())),
            ("title", Value::from("Anchor")),
        ]),
    )
    .unwrap();

    let err = db.delete_many("author", &Where::new()).unwrap_err();
    assert!(matches!(err, AdapterError::ReferentialIntegrity { .. }));

    // The clean author was not removed either: the batch is one unit.
    assert_eq!(db.count("author", None).unwrap(), 2);
    assert!(db
        .find_one("author", &Query::filtered(Where::id(clean.id)))
        .unwrap()
        .is_some());
}

#[test]
fn test_cascade_chain_across_models() {
    // author -> book (cascade) -> review (cascade): deleting the author
    // empties all three tables.
    use schema_types::{define_db, FieldDefinition, FieldType, ModelDefinition, Reference};

    let schema = define_db(vec![
        ModelDefinition::new("author")
            .field(FieldDefinition::new("name", FieldType::String).required()),
        ModelDefinition::new("book").field(
            FieldDefinition::new("authorId", FieldType::String)
                .references(Reference::to("author", "id").on_delete(OnDelete::Cascade)),
        ),
        ModelDefinition::new("review").field(
            FieldDefinition::new("bookId", FieldType::String)
                .references(Reference::to("book", "id").on_delete(OnDelete::Cascade)),
        ),
    ])
    .schema()
    .unwrap();
    let db = MemoryAdapter::new(schema, Default::default());

    let author = db.create("author", field_values([("name", "Ada")])).unwrap();
    let book = db
        .create("book", field_values([("authorId", author.id.as_str())]))
        .unwrap();
    db.create("review", field_values([("bookId", book.id.as_str())]))
        .unwrap();

    db.delete("author", &Where::id(author.id)).unwrap();
    assert_eq!(db.count("book", None).unwrap(), 0);
    assert_eq!(db.count("review", None).unwrap(), 0);
}

#[test]
fn test_referential_integrity_not_enforced_on_write() {
    // A dangling foreign key is accepted at create time; it is only
    // interpreted at join and delete time.
    let db = adapter_with(OnDelete::Cascade);
    db.create(
        "book",
        field_values([("authorId", "nobody"), ("title", "Orphan")]),
    )
    .unwrap();
    assert_eq!(db.count("book", None).unwrap(), 1);
}
