//! Filtering, sorting, pagination, and projection.

use adapter_core::{field_values, Adapter, Operator, Query, SortBy, Where};
use chrono::{TimeZone, Utc};
use schema_types::Value;

use crate::common::adapter;

fn seed_authors(db: &impl Adapter) {
    let dates = [
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
    ];
    for (name, date) in ["Ada", "Bob", "Cyd"].iter().zip(dates) {
        db.create(
            "author",
            field_values([
                ("name", Value::from(*name)),
                ("createdAt", Value::Date(date)),
            ]),
        )
        .unwrap();
    }
}

#[test]
fn test_sort_desc_by_date() {
    let db = adapter();
    seed_authors(&db);
    let records = db
        .find_many(
            "author",
            &Query {
                sort: Some(SortBy::desc("createdAt")),
                ..Query::default()
            },
        )
        .unwrap();
    let names: Vec<Value> = records.iter().map(|r| r.field_value("name")).collect();
    assert_eq!(
        names,
        [Value::from("Bob"), Value::from("Ada"), Value::from("Cyd")]
    );
}

#[test]
fn test_sort_asc_by_string() {
    let db = adapter();
    seed_authors(&db);
    let records = db
        .find_many(
            "author",
            &Query {
                sort: Some(SortBy::asc("name")),
                ..Query::default()
            },
        )
        .unwrap();
    assert_eq!(records[0].field_value("name"), Value::from("Ada"));
    assert_eq!(records[2].field_value("name"), Value::from("Cyd"));
}

#[test]
fn test_unsorted_results_keep_insertion_order() {
    let db = adapter();
    seed_authors(&db);
    let records = db.find_many("author", &Query::default()).unwrap();
    let names: Vec<Value> = records.iter().map(|r| r.field_value("name")).collect();
    assert_eq!(
        names,
        [Value::from("Ada"), Value::from("Bob"), Value::from("Cyd")]
    );
}

#[test]
fn test_pagination_after_sort() {
    let db = adapter();
    seed_authors(&db);
    let records = db
        .find_many(
            "author",
            &Query {
                sort: Some(SortBy::asc("name")),
                offset: Some(1),
                limit: Some(1),
                ..Query::default()
            },
        )
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field_value("name"), Value::from("Bob"));
}

#[test]
fn test_filter_with_ordering_operator() {
    let db = adapter();
    seed_authors(&db);
    let cutoff = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let records = db
        .find_many(
            "author",
            &Query::filtered(Where::new().and("createdAt", Operator::Gte(Value::Date(cutoff)))),
        )
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_filter_or_connector() {
    let db = adapter();
    seed_authors(&db);
    let filter = Where::new()
        .and("name", Operator::Eq(Value::from("Ada")))
        .or("name", Operator::Eq(Value::from("Cyd")));
    assert_eq!(db.count("author", Some(&filter)).unwrap(), 2);
}

#[test]
fn test_filter_membership_and_prefix() {
    let db = adapter();
    seed_authors(&db);
    let filter = Where::new().and(
        "name",
        Operator::In(vec![Value::from("Ada"), Value::from("Bob")]),
    );
    assert_eq!(db.count("author", Some(&filter)).unwrap(), 2);

    let filter = Where::new().and("name", Operator::StartsWith("A".into()));
    assert_eq!(db.count("author", Some(&filter)).unwrap(), 1);
}

#[test]
fn test_find_one_first_match_after_sort() {
    let db = adapter();
    seed_authors(&db);
    let found = db
        .find_one(
            "author",
            &Query {
                sort: Some(SortBy::desc("createdAt")),
                ..Query::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(found.field_value("name"), Value::from("Bob"));
}

#[test]
fn test_find_one_absence_is_none() {
    let db = adapter();
    let found = db
        .find_one("author", &Query::filtered(Where::id("ghost")))
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn test_select_projection() {
    let db = adapter();
    seed_authors(&db);
    let records = db
        .find_many(
            "author",
            &Query {
                select: Some(vec!["name".to_string()]),
                ..Query::default()
            },
        )
        .unwrap();
    assert!(!records[0].id.is_empty());
    assert!(records[0].get("name").is_some());
    assert!(records[0].get("createdAt").is_none());
}
