//! Project documents (`projects`): a named group of pages published under
//! `/app/{slug}`.

use playground_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    /// Id of the page `/app/{slug}` redirects to.
    #[serde(default)]
    pub home_page: Option<EntityId>,
    #[serde(default)]
    pub display_navigation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created: Timestamp,
    #[serde(default)]
    pub modified: Option<Timestamp>,
}

impl Project {
    /// Key used in public URLs: the slug when set, else the id.
    pub fn url_key(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}

/// DTO for creating a project. The slug is derived from `name` when absent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub slug: Option<String>,
    #[validate(length(max = 64))]
    pub home_page: Option<EntityId>,
    pub display_navigation: Option<bool>,
}

/// DTO for updating a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 64))]
    pub home_page: Option<EntityId>,
    pub display_navigation: Option<bool>,
}
