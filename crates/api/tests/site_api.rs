//! HTTP-level tests for the public HTML views.

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use common::{body_json, body_text, get, get_auth, post_json, post_json_auth};
use playground_core::fragment::{encode_fragment, DEFAULT_DOCUMENT};
use playground_db::MemoryStore;
use serde_json::json;

/// A project `acme` with `home` and `about` pages, navigation on.
async fn seed_site(store: &Arc<MemoryStore>) -> (String, String) {
    let app = common::build_app_with_store(Arc::clone(store));
    let project = body_json(
        post_json_auth(
            app,
            "/api/v1/projects",
            "u1",
            json!({"name": "Acme", "slug": "acme", "displayNavigation": true}),
        )
        .await,
    )
    .await;
    let pid = project["data"]["_id"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for (name, path, order) in [("Home", "home", 1), ("About", "about", 2)] {
        let app = common::build_app_with_store(Arc::clone(store));
        let page = body_json(
            post_json_auth(
                app,
                "/api/v1/pages",
                "u1",
                json!({
                    "code": format!("<h1>{name}</h1>"),
                    "projectId": pid,
                    "name": name,
                    "path": path,
                    "addToNavigation": true,
                    "sortOrder": order
                }),
            )
            .await,
        )
        .await;
        ids.push(page["data"]["_id"].as_str().unwrap().to_string());
    }
    (pid, ids.remove(0))
}

fn location(response: &axum::http::Response<axum::body::Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Project sites
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_visitor_is_sent_to_login() {
    let store = Arc::new(MemoryStore::new());
    seed_site(&store).await;

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get(app, "/app/acme/home").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn project_root_redirects_to_first_page_without_home_page() {
    let store = Arc::new(MemoryStore::new());
    seed_site(&store).await;

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get_auth(app, "/app/acme", "viewer").await;
    assert!(response.status().is_redirection());
    // Pages list newest first, so the last saved page leads.
    assert_eq!(location(&response), "/app/acme/about");
}

#[tokio::test]
async fn project_root_redirects_to_configured_home_page() {
    let store = Arc::new(MemoryStore::new());
    let (pid, home_id) = seed_site(&store).await;

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = common::put_json_auth(
        app,
        &format!("/api/v1/projects/{pid}"),
        "u1",
        json!({"homePage": home_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get_auth(app, "/app/acme", "viewer").await;
    assert_eq!(location(&response), "/app/acme/home");
}

#[tokio::test]
async fn project_without_pages_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_app_with_store(Arc::clone(&store));
    post_json_auth(app, "/api/v1/projects", "u1", json!({"name": "Empty"})).await;

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get_auth(app, "/app/empty", "u1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_renders_with_navigation_and_edit_link() {
    let store = Arc::new(MemoryStore::new());
    let (pid, home_id) = seed_site(&store).await;

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get_auth(app, "/app/acme/home", "viewer").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Home</title>"));
    assert!(html.contains("<h1>Home</h1>"));
    assert!(html.contains(r#"href="/app/acme/about""#));
    assert!(html.contains(&format!("/projects/{pid}/{home_id}/edit")));
    let home_link = html.find("/app/acme/home").unwrap();
    let about_link = html.find("/app/acme/about").unwrap();
    assert!(home_link < about_link, "nav follows sort order");
}

#[tokio::test]
async fn page_resolves_by_id_when_no_path_matches() {
    let store = Arc::new(MemoryStore::new());
    let (_, home_id) = seed_site(&store).await;

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get_auth(app, &format!("/app/acme/{home_id}"), "viewer").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<h1>Home</h1>"));

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get_auth(app, "/app/acme/nope", "viewer").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Snippet views and previews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snippet_view_renders_bare_document() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_app_with_store(Arc::clone(&store));
    let saved = body_json(
        post_json(app, "/api/v1/snippets", json!({"code": "<p>shared</p>"})).await,
    )
    .await;
    let id = saved["data"]["_id"].as_str().unwrap();

    let app = common::build_app_with_store(Arc::clone(&store));
    let response = get(app, &format!("/view/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<p>shared</p>"));
    assert!(!html.contains("<title>"));
}

#[tokio::test]
async fn preview_decodes_share_fragment() {
    let app = common::build_test_app();
    let fragment = encode_fragment("<p>draft</p>");
    let response = get(app, &format!("/preview?code={fragment}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<p>draft</p>"));
}

#[tokio::test]
async fn preview_with_corrupt_fragment_renders_starter_document() {
    let app = common::build_test_app();
    let response = get(app, "/preview?code=!!!!").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(DEFAULT_DOCUMENT));
}

#[tokio::test]
async fn preview_without_fragment_renders_starter_document() {
    let app = common::build_test_app();
    let response = get(app, "/preview").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(DEFAULT_DOCUMENT));
}
