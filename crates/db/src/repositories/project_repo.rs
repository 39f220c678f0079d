//! Repository for the `projects` collection.

use chrono::Utc;
use playground_core::error::CoreError;
use playground_core::slug::{generate_slug, validate_slug};
use validator::Validate;

use crate::error::RepoResult;
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::versioned::{decode_all, insert_with_fresh_id};
use crate::store::{from_document, to_document, DocumentStore, Filter, Sort, ID_FIELD};

const COLLECTION: &str = "projects";
const ENTITY: &str = "Project";

/// Provides create/lookup/update operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project owned by `actor`.
    ///
    /// An explicit slug is validated; otherwise one is generated from the
    /// name. A name with no slug-able characters yields a project without a
    /// slug, reachable by id only.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &CreateProject,
        actor: &str,
    ) -> RepoResult<Project> {
        input.validate().map_err(CoreError::from)?;

        let slug = match input.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => {
                validate_slug(slug)?;
                Some(slug.to_string())
            }
            _ => Some(generate_slug(&input.name)).filter(|s| !s.is_empty()),
        };
        if let Some(slug) = &slug {
            Self::ensure_slug_free(store, slug, None).await?;
        }

        let now = Utc::now();
        let project = insert_with_fresh_id(store, COLLECTION, |id| Project {
            id,
            slug: slug.clone(),
            name: input.name.clone(),
            home_page: input.home_page.clone(),
            display_navigation: input.display_navigation.unwrap_or(false),
            owner: Some(actor.to_string()),
            created: now,
            modified: Some(now),
        })
        .await?;

        tracing::info!(project_id = %project.id, slug = ?project.slug, actor, "Project created");
        Ok(project)
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<Project>> {
        match store.find_by_id(COLLECTION, id).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_slug(
        store: &dyn DocumentStore,
        slug: &str,
    ) -> RepoResult<Option<Project>> {
        if slug.is_empty() {
            return Ok(None);
        }
        match store
            .find_one(COLLECTION, &Filter::all().eq("slug", slug))
            .await?
        {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// List projects, newest first, optionally restricted to one owner.
    pub async fn find_all(
        store: &dyn DocumentStore,
        owner: Option<&str>,
    ) -> RepoResult<Vec<Project>> {
        let filter = match owner {
            Some(owner) => Filter::all().eq("owner", owner),
            None => Filter::all(),
        };
        let documents = store
            .find(COLLECTION, &filter, Some(Sort::newest_first("modified")))
            .await?;
        decode_all(documents)
    }

    /// Update a project owned by `actor`. Foreign projects answer `NotFound`.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &UpdateProject,
        actor: &str,
    ) -> RepoResult<Project> {
        input.validate().map_err(CoreError::from)?;

        let mut project = match Self::find_by_id(store, id).await? {
            Some(p) if p.owner.as_deref() == Some(actor) => p,
            _ => return Err(CoreError::not_found(ENTITY, id).into()),
        };

        if let Some(slug) = input.slug.as_deref().map(str::trim) {
            if slug.is_empty() {
                project.slug = None;
            } else {
                validate_slug(slug)?;
                Self::ensure_slug_free(store, slug, Some(id)).await?;
                project.slug = Some(slug.to_string());
            }
        }
        if let Some(name) = &input.name {
            project.name.clone_from(name);
        }
        if let Some(home_page) = &input.home_page {
            project.home_page = Some(home_page.clone()).filter(|h| !h.is_empty());
        }
        if let Some(flag) = input.display_navigation {
            project.display_navigation = flag;
        }
        project.modified = Some(Utc::now());

        let mut patch = to_document(&project)?;
        patch.remove(ID_FIELD);
        let matched = store
            .update(COLLECTION, &Filter::by_id(id).eq("owner", actor), patch)
            .await?;
        if matched == 0 {
            return Err(CoreError::not_found(ENTITY, id).into());
        }

        tracing::info!(project_id = %id, actor, "Project updated");
        Ok(project)
    }

    async fn ensure_slug_free(
        store: &dyn DocumentStore,
        slug: &str,
        except_id: Option<&str>,
    ) -> RepoResult<()> {
        match Self::find_by_slug(store, slug).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(CoreError::Conflict(
                format!("Project slug '{slug}' is already taken"),
            )
            .into()),
            _ => Ok(()),
        }
    }
}
