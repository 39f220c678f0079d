//! Save / fork / version logic shared by snippets and pages.
//!
//! Both entity families follow the same rules:
//!
//! - A save carrying an id the caller owns updates the document in place and
//!   appends one version holding the pre-update code.
//! - Any other save (no id, unknown id, foreign or anonymous owner, no actor)
//!   creates a fresh document. The caller's id is discarded.
//!
//! In-place updates are compare-and-swap writes guarded on the owner and the
//! previously read modification timestamp, retried a bounded number of times.

use std::marker::PhantomData;

use chrono::Utc;
use playground_core::error::CoreError;
use playground_core::ids;
use playground_core::types::{EntityId, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::error::{RepoError, RepoResult};
use crate::models::page::Page;
use crate::store::{
    from_document, to_document, Document, DocumentStore, Filter, Sort, StoreError, ID_FIELD,
};

/// Upper bound on compare-and-swap attempts for one in-place update.
pub const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Upper bound on id regenerations when an insert collides.
pub const MAX_ID_ATTEMPTS: u32 = 3;

// ---------------------------------------------------------------------------
// Entity descriptor
// ---------------------------------------------------------------------------

/// Describes how a versioned entity family is stored and mutated.
pub trait VersionedEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Save request accepted by [`VersionedRepo::save`].
    type Input: Validate + Send + Sync;
    /// Snapshot document written on every in-place update.
    type Version: Serialize + DeserializeOwned + Send + Sync;

    /// Name used in error messages and logs.
    const ENTITY: &'static str;
    const COLLECTION: &'static str;
    const VERSION_COLLECTION: &'static str;
    /// Document field holding the owner id.
    const OWNER_FIELD: &'static str;
    /// Document field holding the last modification timestamp.
    const MODIFIED_FIELD: &'static str;
    /// Version field referencing the parent's id.
    const VERSION_PARENT_FIELD: &'static str;
    /// Version field holding the snapshot timestamp.
    const VERSION_CREATED_FIELD: &'static str;

    fn validate_input(input: &Self::Input) -> Result<(), CoreError> {
        input.validate()?;
        Ok(())
    }

    fn input_id(input: &Self::Input) -> Option<&str>;

    /// Build a brand-new entity from a validated input.
    fn create(id: EntityId, input: &Self::Input, actor: Option<&str>, now: Timestamp) -> Self;

    /// Merge a validated input into the stored entity.
    fn apply_update(&mut self, input: &Self::Input, actor: &str, now: Timestamp);

    /// Snapshot the current state as a version.
    fn snapshot(&self, id: EntityId, label: String) -> Self::Version;

    fn id(&self) -> &str;
    fn owner(&self) -> Option<&str>;
    fn modified(&self) -> Option<Timestamp>;
}

// ---------------------------------------------------------------------------
// Save outcome
// ---------------------------------------------------------------------------

/// Result of a save: whether the entity was updated in place or newly created
/// (including forks of documents the caller may not modify).
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<E> {
    Created(E),
    Updated(E),
}

impl<E> SaveOutcome<E> {
    pub fn entity(&self) -> &E {
        match self {
            SaveOutcome::Created(e) | SaveOutcome::Updated(e) => e,
        }
    }

    pub fn into_entity(self) -> E {
        match self {
            SaveOutcome::Created(e) | SaveOutcome::Updated(e) => e,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, SaveOutcome::Created(_))
    }

    /// `"created"` or `"updated"`.
    pub fn label(&self) -> &'static str {
        match self {
            SaveOutcome::Created(_) => "created",
            SaveOutcome::Updated(_) => "updated",
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Repository for a versioned entity family.
pub struct VersionedRepo<E>(PhantomData<E>);

pub type SnippetRepo = VersionedRepo<crate::models::snippet::Snippet>;
pub type PageRepo = VersionedRepo<Page>;

pub(crate) fn decode_all<T: DeserializeOwned>(documents: Vec<Document>) -> RepoResult<Vec<T>> {
    documents
        .into_iter()
        .map(|d| from_document(d).map_err(RepoError::from))
        .collect()
}

impl<E: VersionedEntity> VersionedRepo<E> {
    /// Save an entity: update in place when `actor` owns `input.id`, create
    /// otherwise.
    pub async fn save(
        store: &dyn DocumentStore,
        input: &E::Input,
        actor: Option<&str>,
    ) -> RepoResult<SaveOutcome<E>> {
        E::validate_input(input)?;
        let actor = actor.filter(|a| !a.is_empty());

        if let (Some(id), Some(actor)) = (E::input_id(input), actor) {
            if let Some(updated) = Self::update_owned(store, id, input, actor).await? {
                return Ok(SaveOutcome::Updated(updated));
            }
            tracing::debug!(entity = E::ENTITY, id, actor, "Save target not owned, forking");
        }

        let now = Utc::now();
        let created =
            insert_with_fresh_id(store, E::COLLECTION, |id| E::create(id, input, actor, now))
                .await?;
        tracing::info!(entity = E::ENTITY, id = created.id(), actor = ?actor, "Entity created");
        Ok(SaveOutcome::Created(created))
    }

    /// Compare-and-swap update. `Ok(None)` means the save must fork.
    async fn update_owned(
        store: &dyn DocumentStore,
        id: &str,
        input: &E::Input,
        actor: &str,
    ) -> RepoResult<Option<E>> {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let Some(current) = Self::find_by_id(store, id).await? else {
                return Ok(None);
            };
            if current.owner() != Some(actor) {
                return Ok(None);
            }

            let mut merged = current.clone();
            merged.apply_update(input, actor, Utc::now());
            let mut patch = to_document(&merged)?;
            patch.remove(ID_FIELD);

            let previous = serde_json::to_value(current.modified()).map_err(StoreError::from)?;
            let guard = Filter::by_id(id)
                .eq(E::OWNER_FIELD, actor)
                .eq(E::MODIFIED_FIELD, previous);

            if store.update(E::COLLECTION, &guard, patch).await? == 0 {
                tracing::warn!(
                    entity = E::ENTITY,
                    id,
                    attempt,
                    "Concurrent modification detected, retrying save"
                );
                continue;
            }

            insert_with_fresh_id(store, E::VERSION_COLLECTION, |version_id| {
                current.snapshot(version_id, ids::version_label())
            })
            .await?;
            tracing::info!(entity = E::ENTITY, id, actor, "Entity updated");
            return Ok(Some(merged));
        }

        Err(CoreError::Conflict(format!(
            "{} {id} was modified concurrently; retry the save",
            E::ENTITY
        ))
        .into())
    }

    /// List entities, newest modification first, optionally restricted to one
    /// owner.
    pub async fn find_all(store: &dyn DocumentStore, owner: Option<&str>) -> RepoResult<Vec<E>> {
        let filter = match owner {
            Some(owner) => Filter::all().eq(E::OWNER_FIELD, owner),
            None => Filter::all(),
        };
        let documents = store
            .find(
                E::COLLECTION,
                &filter,
                Some(Sort::newest_first(E::MODIFIED_FIELD)),
            )
            .await?;
        decode_all(documents)
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<E>> {
        match store.find_by_id(E::COLLECTION, id).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Fetch an entity, failing with `NotFound` when absent.
    pub async fn find_one(store: &dyn DocumentStore, id: &str) -> RepoResult<E> {
        Self::find_by_id(store, id)
            .await?
            .ok_or_else(|| CoreError::not_found(E::ENTITY, id).into())
    }

    /// Version history of an entity, newest snapshot first.
    pub async fn get_versions(store: &dyn DocumentStore, id: &str) -> RepoResult<Vec<E::Version>> {
        let documents = store
            .find(
                E::VERSION_COLLECTION,
                &Filter::all().eq(E::VERSION_PARENT_FIELD, id),
                Some(Sort::newest_first(E::VERSION_CREATED_FIELD)),
            )
            .await?;
        decode_all(documents)
    }

    /// Delete an entity owned by `actor`.
    ///
    /// Missing and foreign entities both answer `NotFound`. Versions are kept.
    pub async fn delete(store: &dyn DocumentStore, id: &str, actor: &str) -> RepoResult<()> {
        let owned = matches!(
            Self::find_by_id(store, id).await?,
            Some(ref e) if !actor.is_empty() && e.owner() == Some(actor)
        );
        if !owned {
            return Err(CoreError::not_found(E::ENTITY, id).into());
        }

        let removed = store
            .delete(
                E::COLLECTION,
                &Filter::by_id(id).eq(E::OWNER_FIELD, actor),
            )
            .await?;
        if removed == 0 {
            return Err(CoreError::not_found(E::ENTITY, id).into());
        }
        tracing::info!(entity = E::ENTITY, id, actor, "Entity deleted");
        Ok(())
    }
}

impl VersionedRepo<Page> {
    /// Pages of a project, newest modification first.
    pub async fn find_all_by_project(
        store: &dyn DocumentStore,
        project_id: &str,
    ) -> RepoResult<Vec<Page>> {
        let documents = store
            .find(
                Page::COLLECTION,
                &Filter::all().eq("projectId", project_id),
                Some(Sort::newest_first(Page::MODIFIED_FIELD)),
            )
            .await?;
        decode_all(documents)
    }

    /// Page of a project with exactly this path. An empty path never matches.
    pub async fn find_by_path(
        store: &dyn DocumentStore,
        project_id: &str,
        path: &str,
    ) -> RepoResult<Option<Page>> {
        if path.is_empty() {
            return Ok(None);
        }
        let filter = Filter::all()
            .eq("projectId", project_id)
            .eq("path", path);
        match store.find_one(Page::COLLECTION, &filter).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }
}

/// Insert a document built around a freshly generated id, regenerating the
/// id when the collection already holds it.
pub(crate) async fn insert_with_fresh_id<T, F>(
    store: &dyn DocumentStore,
    collection: &str,
    mut build: F,
) -> RepoResult<T>
where
    T: Serialize + Send,
    F: FnMut(EntityId) -> T + Send,
{
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let value = build(ids::entity_id());
        match store.insert(collection, to_document(&value)?).await {
            Ok(()) => return Ok(value),
            Err(StoreError::DuplicateId { id, .. }) => {
                tracing::warn!(collection, id = %id, attempt, "Generated id collided, regenerating");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(CoreError::Internal(format!("could not allocate a unique id in '{collection}'")).into())
}

