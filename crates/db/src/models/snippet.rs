//! Snippet documents (`snippets`) and their history (`snippet_versions`).

use playground_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::repositories::versioned::VersionedEntity;

/// A stored snippet of HTML markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub code: String,
    /// Absent for anonymous snippets, which can only ever be forked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Immutable snapshot of a snippet's code before an in-place update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetVersion {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub snippet_id: EntityId,
    pub code: String,
    pub version_id: String,
    pub created_at: Timestamp,
}

/// Save request for a snippet. With an `id` owned by the caller the snippet
/// is updated in place; otherwise a new snippet is created.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SaveSnippet {
    #[serde(default, alias = "_id")]
    pub id: Option<EntityId>,
    #[validate(
        required(message = "code is required"),
        length(max = 1_000_000, message = "code is too long")
    )]
    pub code: Option<String>,
}

impl VersionedEntity for Snippet {
    type Input = SaveSnippet;
    type Version = SnippetVersion;

    const ENTITY: &'static str = "Snippet";
    const COLLECTION: &'static str = "snippets";
    const VERSION_COLLECTION: &'static str = "snippet_versions";
    const OWNER_FIELD: &'static str = "ownerId";
    const MODIFIED_FIELD: &'static str = "updatedAt";
    const VERSION_PARENT_FIELD: &'static str = "snippetId";
    const VERSION_CREATED_FIELD: &'static str = "createdAt";

    fn input_id(input: &SaveSnippet) -> Option<&str> {
        input.id.as_deref()
    }

    fn create(id: EntityId, input: &SaveSnippet, actor: Option<&str>, now: Timestamp) -> Self {
        Snippet {
            id,
            code: input.code.clone().unwrap_or_default(),
            owner_id: actor.map(str::to_string),
            created_at: now,
            updated_at: Some(now),
        }
    }

    fn apply_update(&mut self, input: &SaveSnippet, _actor: &str, now: Timestamp) {
        if let Some(code) = &input.code {
            self.code.clone_from(code);
        }
        self.updated_at = Some(now);
    }

    fn snapshot(&self, id: EntityId, label: String) -> SnippetVersion {
        SnippetVersion {
            id,
            snippet_id: self.id.clone(),
            code: self.code.clone(),
            version_id: label,
            created_at: self.updated_at.unwrap_or(self.created_at),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    fn modified(&self) -> Option<Timestamp> {
        self.updated_at
    }
}
