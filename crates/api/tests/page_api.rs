//! HTTP-level integration tests for the page endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth};
use playground_db::MemoryStore;
use serde_json::json;

async fn save_page(
    store: &Arc<MemoryStore>,
    actor: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let app = common::build_app_with_store(Arc::clone(store));
    let response = post_json_auth(app, "/api/v1/pages", actor, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_page_copies_fields() {
    let store = Arc::new(MemoryStore::new());
    let (status, json) = save_page(
        &store,
        "u1",
        json!({
            "code": "<h1>About</h1>",
            "projectId": "proj01",
            "name": "About",
            "path": "about",
            "metaTitle": "About us",
            "addToNavigation": true,
            "sortOrder": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let page = &json["data"];
    assert_eq!(page["projectId"], "proj01");
    assert_eq!(page["path"], "about");
    assert_eq!(page["metaTitle"], "About us");
    assert_eq!(page["addToNavigation"], true);
    assert_eq!(page["sortOrder"], 2);
    assert_eq!(page["owner"], "u1");
    assert_eq!(page["created_by"], "u1");
}

#[tokio::test]
async fn owner_update_keeps_project_and_records_version() {
    let store = Arc::new(MemoryStore::new());
    let (_, created) = save_page(
        &store,
        "u1",
        json!({"code": "v1", "projectId": "proj01", "name": "Home"}),
    )
    .await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, updated) = save_page(
        &store,
        "u1",
        json!({"id": id, "code": "v2", "projectId": "other", "path": "home"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["outcome"], "updated");
    assert_eq!(updated["data"]["projectId"], "proj01");
    assert_eq!(updated["data"]["name"], "Home");
    assert_eq!(updated["data"]["path"], "home");
    assert_eq!(updated["data"]["modified_by"], "u1");

    let app = common::build_app_with_store(Arc::clone(&store));
    let versions = body_json(get(app, &format!("/api/v1/pages/{id}/versions")).await).await;
    let versions = versions["data"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["code"], "v1");
    assert_eq!(versions[0]["pageId"], id.as_str());
    assert_eq!(versions[0]["versionId"].as_str().unwrap().len(), 4);
}

#[tokio::test]
async fn invalid_path_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let (status, json) = save_page(
        &store,
        "u1",
        json!({"code": "x", "projectId": "proj01", "path": "blog/post"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(store.count("pages").await, 0);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_deletes_page() {
    let store = Arc::new(MemoryStore::new());
    let (_, created) = save_page(&store, "u1", json!({"code": "x", "projectId": "p"})).await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/pages/{id}");

    let app = common::build_app_with_store(Arc::clone(&store));
    assert_eq!(
        delete_auth(app, &uri, "intruder").await.status(),
        StatusCode::NOT_FOUND
    );

    let app = common::build_app_with_store(Arc::clone(&store));
    assert_eq!(delete_auth(app, &uri, "u1").await.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.count("pages").await, 0);
}
