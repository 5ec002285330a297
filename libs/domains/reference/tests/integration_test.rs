//! PostgreSQL-backed tests for the Reference domain
//!
//! Each test starts its own container, so they are ignored by default:
//! `cargo test -p domain_reference -- --ignored`

use domain_reference::*;
use serde_json::{Map, Value, json};
use test_utils::{TestDataBuilder, TestDatabase};

fn body(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_crud_against_every_table() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("pg_reference_crud");

    for kind in [ReferenceKind::Make, ReferenceKind::Color, ReferenceKind::Location] {
        let service = ReferenceService::new(kind, PgReferenceRepository::new(db.connection(), kind));
        let name = builder.name(kind.table(), "first");
        let renamed = builder.name(kind.table(), "renamed");

        let created = service
            .create(body(json!({ kind.name_field(): name })))
            .await
            .unwrap();
        assert_eq!(service.get(created.id).await.unwrap().name, name);

        service
            .update(created.id, body(json!({ kind.name_field(): renamed })))
            .await
            .unwrap();
        assert_eq!(service.get(created.id).await.unwrap().name, renamed);

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(ReferenceError::NotFound(k)) if k == kind
        ));
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_surfaces_as_already_exists() {
    let db = TestDatabase::new().await;
    let name = TestDataBuilder::from_test_name("pg_reference_unique").name("color", "red");
    let repo = PgReferenceRepository::new(db.connection(), ReferenceKind::Color);

    repo.insert(&name).await.unwrap();
    let result = repo.insert(&name).await;

    assert!(matches!(result, Err(ReferenceError::AlreadyExists(n)) if n == name));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_rename_onto_existing_is_already_taken() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("pg_reference_taken");
    let repo = PgReferenceRepository::new(db.connection(), ReferenceKind::Make);

    let first = repo.insert(&builder.name("make", "a")).await.unwrap();
    let second = repo.insert(&builder.name("make", "b")).await.unwrap();

    let result = repo.update(second.id, &first.name).await;
    assert!(matches!(result, Err(ReferenceError::AlreadyTaken(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_rows_report_false() {
    let db = TestDatabase::new().await;
    let repo = PgReferenceRepository::new(db.connection(), ReferenceKind::Location);

    assert!(repo.get_by_id(4242).await.unwrap().is_none());
    assert!(!repo.update(4242, "nowhere").await.unwrap());
    assert!(!repo.delete(4242).await.unwrap());
}
