//! Page documents (`pages`) and their history (`page_versions`).

use playground_core::error::CoreError;
use playground_core::slug::validate_page_path;
use playground_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::repositories::versioned::VersionedEntity;

/// A page of a project site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    #[serde(default)]
    pub name: Option<String>,
    pub code: String,
    #[serde(default)]
    pub meta_title: Option<String>,
    /// URL segment under the project; preferred over the id in links.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub add_to_navigation: bool,
    #[serde(default)]
    pub sort_order: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created: Timestamp,
    #[serde(rename = "created_by", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub modified: Option<Timestamp>,
    #[serde(rename = "modified_by", default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

impl Page {
    /// Non-empty path, if the page has one.
    pub fn path_segment(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Immutable snapshot of a page's code before an in-place update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub page_id: EntityId,
    pub code: String,
    pub version_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created: Timestamp,
    #[serde(rename = "created_by", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Save request for a page.
///
/// On update only `code` always overwrites. The other optional fields
/// overwrite when present, so `Some("")` clears a name while `None` keeps it.
/// `project_id` is only read on creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SavePage {
    #[serde(default, alias = "_id")]
    pub id: Option<EntityId>,
    #[validate(
        required(message = "code is required"),
        length(max = 1_000_000, message = "code is too long")
    )]
    pub code: Option<String>,
    #[validate(length(max = 64))]
    pub project_id: Option<EntityId>,
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub meta_title: Option<String>,
    pub path: Option<String>,
    pub add_to_navigation: Option<bool>,
    pub sort_order: Option<i32>,
}

impl VersionedEntity for Page {
    type Input = SavePage;
    type Version = PageVersion;

    const ENTITY: &'static str = "Page";
    const COLLECTION: &'static str = "pages";
    const VERSION_COLLECTION: &'static str = "page_versions";
    const OWNER_FIELD: &'static str = "owner";
    const MODIFIED_FIELD: &'static str = "modified";
    const VERSION_PARENT_FIELD: &'static str = "pageId";
    const VERSION_CREATED_FIELD: &'static str = "created";

    fn validate_input(input: &SavePage) -> Result<(), CoreError> {
        input.validate()?;
        if let Some(path) = &input.path {
            validate_page_path(path)?;
        }
        Ok(())
    }

    fn input_id(input: &SavePage) -> Option<&str> {
        input.id.as_deref()
    }

    fn create(id: EntityId, input: &SavePage, actor: Option<&str>, now: Timestamp) -> Self {
        let actor = actor.map(str::to_string);
        Page {
            id,
            project_id: input.project_id.clone(),
            name: input.name.clone(),
            code: input.code.clone().unwrap_or_default(),
            meta_title: input.meta_title.clone(),
            path: input.path.clone(),
            add_to_navigation: input.add_to_navigation.unwrap_or(false),
            sort_order: input.sort_order,
            owner: actor.clone(),
            created: now,
            created_by: actor.clone(),
            modified: Some(now),
            modified_by: actor,
        }
    }

    fn apply_update(&mut self, input: &SavePage, actor: &str, now: Timestamp) {
        if let Some(code) = &input.code {
            self.code.clone_from(code);
        }
        if let Some(name) = &input.name {
            self.name = Some(name.clone());
        }
        if let Some(meta_title) = &input.meta_title {
            self.meta_title = Some(meta_title.clone());
        }
        if let Some(path) = &input.path {
            self.path = Some(path.clone());
        }
        if let Some(flag) = input.add_to_navigation {
            self.add_to_navigation = flag;
        }
        if let Some(order) = input.sort_order {
            self.sort_order = Some(order);
        }
        self.modified = Some(now);
        self.modified_by = Some(actor.to_string());
    }

    fn snapshot(&self, id: EntityId, label: String) -> PageVersion {
        PageVersion {
            id,
            page_id: self.id.clone(),
            code: self.code.clone(),
            version_id: label,
            owner: self.owner.clone(),
            created: self.modified.unwrap_or(self.created),
            created_by: self.modified_by.clone().or_else(|| self.created_by.clone()),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    fn modified(&self) -> Option<Timestamp> {
        self.modified
    }
}
