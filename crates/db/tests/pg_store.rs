//! PostgreSQL document store tests. Require `DATABASE_URL`; run with
//! `cargo test -p playground-db -- --ignored`.

use assert_matches::assert_matches;
use playground_core::error::CoreError;
use playground_db::models::snippet::SaveSnippet;
use playground_db::repositories::{SaveOutcome, SnippetRepo};
use playground_db::store::{DocumentStore, Filter, Sort, StoreError};
use playground_db::{PgDocumentStore, RepoError};
use serde_json::{json, Value};
use sqlx::PgPool;

fn doc(value: Value) -> playground_db::Document {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("test documents are objects"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn insert_find_and_duplicate(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    store
        .insert("snippets", doc(json!({"_id": "abc123", "code": "x"})))
        .await
        .unwrap();

    let found = store.find_by_id("snippets", "abc123").await.unwrap().unwrap();
    assert_eq!(found["code"], "x");

    let err = store
        .insert("snippets", doc(json!({"_id": "abc123"})))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::DuplicateId { .. });

    // Same id in another collection is fine.
    store
        .insert("pages", doc(json!({"_id": "abc123"})))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn null_conditions_and_sorting(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    store
        .insert("c", doc(json!({"_id": "a", "t": "2026-01-01T00:00:00Z"})))
        .await
        .unwrap();
    store
        .insert("c", doc(json!({"_id": "b", "t": "2026-01-02T00:00:00Z", "owner": "u1"})))
        .await
        .unwrap();
    store.insert("c", doc(json!({"_id": "n"}))).await.unwrap();

    let anonymous = store
        .find("c", &Filter::all().eq("owner", Value::Null), None)
        .await
        .unwrap();
    assert_eq!(anonymous.len(), 2);

    let newest = store
        .find("c", &Filter::all(), Some(Sort::newest_first("t")))
        .await
        .unwrap();
    let ids: Vec<_> = newest.iter().map(|d| d["_id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["b", "a", "n"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn conditional_update_and_delete(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    store
        .insert("c", doc(json!({"_id": "a", "owner": "u1", "code": "v1"})))
        .await
        .unwrap();

    let stale = Filter::by_id("a").eq("owner", "u2");
    assert_eq!(store.update("c", &stale, doc(json!({"code": "no"}))).await.unwrap(), 0);

    let current = Filter::by_id("a").eq("owner", "u1");
    assert_eq!(store.update("c", &current, doc(json!({"code": "v2"}))).await.unwrap(), 1);
    let found = store.find_by_id("c", "a").await.unwrap().unwrap();
    assert_eq!(found["code"], "v2");
    assert_eq!(found["owner"], "u1");

    assert_eq!(store.delete("c", &current).await.unwrap(), 1);
    assert!(store.find_by_id("c", "a").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn snippet_update_round_trips_through_jsonb(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let input = SaveSnippet {
        id: None,
        code: Some("v1".into()),
    };
    let created = SnippetRepo::save(&store, &input, Some("alice"))
        .await
        .unwrap()
        .into_entity();

    let edit = SaveSnippet {
        id: Some(created.id.clone()),
        code: Some("v2".into()),
    };
    let outcome = SnippetRepo::save(&store, &edit, Some("alice")).await.unwrap();
    assert_matches!(outcome, SaveOutcome::Updated(_));

    let versions = SnippetRepo::get_versions(&store, &created.id).await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].code, "v1");

    assert_matches!(
        SnippetRepo::delete(&store, &created.id, "bob").await,
        Err(RepoError::Core(CoreError::NotFound { .. }))
    );
}
