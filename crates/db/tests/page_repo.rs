//! Page save / version / lookup behaviour against the in-memory store.

use assert_matches::assert_matches;
use playground_core::error::CoreError;
use playground_db::models::page::SavePage;
use playground_db::repositories::{PageRepo, SaveOutcome};
use playground_db::{MemoryStore, RepoError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_page(project_id: &str, code: &str, path: Option<&str>) -> SavePage {
    SavePage {
        code: Some(code.to_string()),
        project_id: Some(project_id.to_string()),
        name: Some("Home".to_string()),
        path: path.map(str::to_string),
        ..Default::default()
    }
}

fn edit_page(id: &str, code: &str) -> SavePage {
    SavePage {
        id: Some(id.to_string()),
        code: Some(code.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_update_keeps_one_version_of_previous_code() {
    let store = MemoryStore::new();
    let created = PageRepo::save(&store, &new_page("proj01", "v1", None), Some("u1"))
        .await
        .unwrap()
        .into_entity();
    assert_eq!(created.owner.as_deref(), Some("u1"));
    assert_eq!(created.created_by.as_deref(), Some("u1"));
    assert_eq!(created.modified_by.as_deref(), Some("u1"));

    let outcome = PageRepo::save(&store, &edit_page(&created.id, "v2"), Some("u1"))
        .await
        .unwrap();
    assert_matches!(outcome, SaveOutcome::Updated(ref p) if p.id == created.id);

    let versions = PageRepo::get_versions(&store, &created.id).await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].code, "v1");
    assert_eq!(versions[0].page_id, created.id);
    assert_eq!(versions[0].owner.as_deref(), Some("u1"));
    assert_eq!(versions[0].created_by.as_deref(), Some("u1"));
    assert_eq!(Some(versions[0].created), created.modified);

    assert_eq!(PageRepo::find_one(&store, &created.id).await.unwrap().code, "v2");
}

#[tokio::test]
async fn absent_fields_are_left_unchanged_on_update() {
    let store = MemoryStore::new();
    let mut input = new_page("proj01", "v1", Some("home"));
    input.meta_title = Some("Welcome".into());
    input.add_to_navigation = Some(true);
    input.sort_order = Some(2);
    let created = PageRepo::save(&store, &input, Some("u1"))
        .await
        .unwrap()
        .into_entity();

    let updated = PageRepo::save(&store, &edit_page(&created.id, "v2"), Some("u1"))
        .await
        .unwrap()
        .into_entity();
    assert_eq!(updated.name.as_deref(), Some("Home"));
    assert_eq!(updated.meta_title.as_deref(), Some("Welcome"));
    assert_eq!(updated.path.as_deref(), Some("home"));
    assert!(updated.add_to_navigation);
    assert_eq!(updated.sort_order, Some(2));
    assert_eq!(updated.created, created.created);
}

#[tokio::test]
async fn empty_values_overwrite_on_update() {
    let store = MemoryStore::new();
    let created = PageRepo::save(&store, &new_page("proj01", "v1", Some("home")), Some("u1"))
        .await
        .unwrap()
        .into_entity();

    let input = SavePage {
        name: Some(String::new()),
        path: Some(String::new()),
        add_to_navigation: Some(false),
        ..edit_page(&created.id, "v2")
    };
    let updated = PageRepo::save(&store, &input, Some("u1"))
        .await
        .unwrap()
        .into_entity();
    assert_eq!(updated.name.as_deref(), Some(""));
    assert_eq!(updated.path.as_deref(), Some(""));

    let stored = PageRepo::find_one(&store, &created.id).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_never_moves_page_between_projects() {
    let store = MemoryStore::new();
    let created = PageRepo::save(&store, &new_page("proj01", "v1", None), Some("u1"))
        .await
        .unwrap()
        .into_entity();

    let input = SavePage {
        project_id: Some("proj02".into()),
        ..edit_page(&created.id, "v2")
    };
    let updated = PageRepo::save(&store, &input, Some("u1"))
        .await
        .unwrap()
        .into_entity();
    assert_eq!(updated.project_id.as_deref(), Some("proj01"));
}

#[tokio::test]
async fn foreign_update_forks_into_callers_page() {
    let store = MemoryStore::new();
    let original = PageRepo::save(&store, &new_page("proj01", "v1", None), Some("u1"))
        .await
        .unwrap()
        .into_entity();

    let fork = PageRepo::save(&store, &edit_page(&original.id, "v2"), Some("u2"))
        .await
        .unwrap();
    assert!(fork.is_created());
    assert_eq!(fork.entity().owner.as_deref(), Some("u2"));
    assert_eq!(PageRepo::find_one(&store, &original.id).await.unwrap(), original);
}

#[tokio::test]
async fn invalid_path_rejected() {
    let store = MemoryStore::new();
    let err = PageRepo::save(&store, &new_page("proj01", "x", Some("a/b")), Some("u1"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unicode_and_unreserved_paths_stored_verbatim() {
    let store = MemoryStore::new();
    for path in ["über-uns", "contact~me"] {
        let saved = PageRepo::save(&store, &new_page("proj01", path, Some(path)), Some("u1"))
            .await
            .unwrap()
            .into_entity();
        assert_eq!(saved.path.as_deref(), Some(path));

        let found = PageRepo::find_by_path(&store, "proj01", path)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.code, path);
    }
}

#[tokio::test]
async fn path_and_id_resolve_to_same_page() {
    let store = MemoryStore::new();
    let created = PageRepo::save(&store, &new_page("proj01", "hello", Some("home")), Some("u1"))
        .await
        .unwrap()
        .into_entity();

    let by_path = PageRepo::find_by_path(&store, "proj01", "home")
        .await
        .unwrap()
        .unwrap();
    let by_id = PageRepo::find_one(&store, &created.id).await.unwrap();
    assert_eq!(by_path, by_id);
}

#[tokio::test]
async fn missing_path_is_absent_not_error() {
    let store = MemoryStore::new();
    PageRepo::save(&store, &new_page("proj01", "x", Some("home")), Some("u1"))
        .await
        .unwrap();

    assert!(PageRepo::find_by_path(&store, "proj01", "missing-slug")
        .await
        .unwrap()
        .is_none());
    assert!(PageRepo::find_by_path(&store, "proj02", "home")
        .await
        .unwrap()
        .is_none());
    assert!(PageRepo::find_by_path(&store, "proj01", "")
        .await
        .unwrap()
        .is_none());
    assert_matches!(
        PageRepo::find_one(&store, "missing-slug").await,
        Err(RepoError::Core(CoreError::NotFound { entity: "Page", .. }))
    );
}

#[tokio::test]
async fn pages_listed_per_project() {
    let store = MemoryStore::new();
    let first = PageRepo::save(&store, &new_page("proj01", "a", None), Some("u1"))
        .await
        .unwrap()
        .into_entity();
    PageRepo::save(&store, &new_page("proj02", "b", None), Some("u1"))
        .await
        .unwrap();
    let third = PageRepo::save(&store, &new_page("proj01", "c", None), Some("u1"))
        .await
        .unwrap()
        .into_entity();

    let pages = PageRepo::find_all_by_project(&store, "proj01").await.unwrap();
    let ids: Vec<_> = pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, [third.id.as_str(), first.id.as_str()]);
}
