//! Resolution of published project sites: `/app/{project}/{page}` lookups,
//! home page selection and navigation bars.

use playground_core::error::CoreError;
use playground_core::render::{
    page_href, project_href, render_document, NavLink, PageMeta, SiteNav, UNTITLED_PAGE,
};

use crate::error::RepoResult;
use crate::models::page::Page;
use crate::models::project::Project;
use crate::repositories::project_repo::ProjectRepo;
use crate::repositories::versioned::PageRepo;
use crate::store::DocumentStore;

/// Find a project by slug, falling back to its id.
pub async fn resolve_project(store: &dyn DocumentStore, slug_or_id: &str) -> RepoResult<Project> {
    if let Some(project) = ProjectRepo::find_by_slug(store, slug_or_id).await? {
        return Ok(project);
    }
    ProjectRepo::find_by_id(store, slug_or_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", slug_or_id).into())
}

/// The project's configured home page, else the first page.
pub fn pick_home_page<'a>(project: &Project, pages: &'a [Page]) -> Option<&'a Page> {
    project
        .home_page
        .as_deref()
        .and_then(|home| pages.iter().find(|p| p.id == home))
        .or_else(|| pages.first())
}

/// Find a page of `project` by path, falling back to its id.
///
/// A page id belonging to another project does not resolve.
pub async fn resolve_page(
    store: &dyn DocumentStore,
    project: &Project,
    page_key: &str,
) -> RepoResult<Page> {
    if let Some(page) = PageRepo::find_by_path(store, &project.id, page_key).await? {
        return Ok(page);
    }
    match PageRepo::find_by_id(store, page_key).await? {
        Some(page) if page.project_id.as_deref() == Some(project.id.as_str()) => Ok(page),
        _ => Err(CoreError::not_found("Page", page_key).into()),
    }
}

/// URL segment of a page: its non-empty path, else its id.
pub fn page_key(page: &Page) -> &str {
    page.path_segment().unwrap_or(&page.id)
}

/// Public URL of a page.
pub fn page_url(project: &Project, page: &Page) -> String {
    page_href(project.url_key(), page_key(page))
}

/// Editor URL for a page.
pub fn edit_url(project: &Project, page: &Page) -> String {
    format!("/projects/{}/{}/edit", project.id, page.id)
}

/// Navigation bar for `project`, or `None` when the project hides navigation
/// or no page opts into it.
///
/// Links keep the order of `pages`, except that pages with a sort order come
/// first, ascending.
pub fn navigation(project: &Project, pages: &[Page], current: Option<&Page>) -> Option<SiteNav> {
    if !project.display_navigation {
        return None;
    }

    let mut listed: Vec<&Page> = pages.iter().filter(|p| p.add_to_navigation).collect();
    if listed.is_empty() {
        return None;
    }
    listed.sort_by_key(|p| p.sort_order.unwrap_or(i32::MAX));

    let links = listed
        .into_iter()
        .map(|page| NavLink {
            label: page
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(UNTITLED_PAGE)
                .to_string(),
            href: page_url(project, page),
            active: current.is_some_and(|c| c.id == page.id),
        })
        .collect();

    Some(SiteNav {
        title: project.name.clone(),
        home_href: project_href(project.url_key()),
        links,
    })
}

/// Render `page` as a full site document with navigation and edit link.
pub fn render_page(project: &Project, page: &Page, pages: &[Page]) -> String {
    let meta = PageMeta {
        name: page.name.as_deref(),
        meta_title: page.meta_title.as_deref(),
    };
    let nav = navigation(project, pages, Some(page));
    render_document(
        &page.code,
        Some(&meta),
        nav.as_ref(),
        Some(&edit_url(project, page)),
    )
}
