//! Standalone HTML document assembly for published pages and snippets.
//!
//! Rendering is a pure function of its inputs: no timestamps, ids or other
//! hidden state end up in the output, so identical inputs always produce
//! byte-identical documents.
//!
//! The body markup is injected verbatim. Authors intentionally write arbitrary
//! HTML (scripts included), so stored code is trusted as-is. Only the
//! metadata this module generates itself (title, nav labels, hrefs) is
//! escaped.

use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Utility-class styling engine loaded by every rendered document.
pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Title used when a page has neither a meta title nor a name.
pub const UNTITLED_PAGE: &str = "Untitled Page";

const NAV_ACTIVE_CLASS: &str = "text-white font-medium";
const NAV_INACTIVE_CLASS: &str = "text-gray-400 hover:text-white";

const EDIT_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15.232 5.232l3.536 3.536m-2.036-5.036a2.5 2.5 0 113.536 3.536L6.5 21.036H3v-3.572L16.732 3.732z" /></svg>"#;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Page metadata that influences the document head.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageMeta<'a> {
    pub name: Option<&'a str>,
    pub meta_title: Option<&'a str>,
}

/// A single entry of the site navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Whether this link points at the page being rendered.
    pub active: bool,
}

/// Site navigation bar: project brand link plus page links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteNav {
    pub title: String,
    pub home_href: String,
    pub links: Vec<NavLink>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the document title: meta title, then name, then [`UNTITLED_PAGE`].
///
/// An explicitly empty meta title is kept (it is a real value, not a gap).
pub fn page_title<'a>(meta: Option<&PageMeta<'a>>) -> &'a str {
    meta.and_then(|m| m.meta_title.or(m.name))
        .unwrap_or(UNTITLED_PAGE)
}

/// Public URL of a page inside a project site.
pub fn page_href(project_key: &str, page_key: &str) -> String {
    format!("/app/{project_key}/{page_key}")
}

/// Public URL of a project site root.
pub fn project_href(project_key: &str) -> String {
    format!("/app/{project_key}")
}

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn render_nav(nav: &SiteNav) -> String {
    let links: String = nav
        .links
        .iter()
        .map(|link| {
            let class = if link.active {
                NAV_ACTIVE_CLASS
            } else {
                NAV_INACTIVE_CLASS
            };
            format!(
                r#"<a href="{}" class="{class} transition-colors">{}</a>"#,
                escape_html(&link.href),
                escape_html(&link.label),
            )
        })
        .collect();

    format!(
        r#"
    <nav class="fixed top-0 left-0 right-0 z-50 bg-black/80 backdrop-blur-md border-b border-white/10 px-6 py-4">
        <div class="max-w-7xl mx-auto flex items-center justify-between">
            <a href="{home}" class="text-white font-bold text-lg tracking-tight">{title}</a>
            <div class="flex items-center gap-6 text-sm">
                {links}
            </div>
        </div>
    </nav>
    <div class="h-16"></div>"#,
        home = escape_html(&nav.home_href),
        title = escape_html(&nav.title),
    )
}

fn render_edit_button(edit_url: &str) -> String {
    format!(
        r#"
    <a href="{}" class="fixed bottom-6 right-6 z-50 bg-blue-600 hover:bg-blue-500 text-white px-4 py-2 rounded-full shadow-lg font-medium transition-all flex items-center gap-2 hover:scale-105 active:scale-95">
        {EDIT_ICON}
        Edit Page
    </a>"#,
        escape_html(edit_url)
    )
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Render a published page as a complete HTML document.
///
/// The navigation bar is emitted only when `nav` is present and has at least
/// one link; the caller decides whether the project shows navigation at all.
pub fn render_document(
    body: &str,
    meta: Option<&PageMeta<'_>>,
    nav: Option<&SiteNav>,
    edit_url: Option<&str>,
) -> String {
    let title = escape_html(page_title(meta));
    let nav_html = nav
        .filter(|n| !n.links.is_empty())
        .map(render_nav)
        .unwrap_or_default();
    let edit_html = edit_url.map(render_edit_button).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{TAILWIND_CDN}"></script>
</head>
<body class="bg-black min-h-screen text-white">{nav_html}
    {body}{edit_html}
</body>
</html>"#
    )
}

/// Render a bare snippet: boilerplate head, no title, nav or chrome.
pub fn render_snippet(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <script src="{TAILWIND_CDN}"></script>
</head>
<body>
    {code}
</body>
</html>"#
    )
}
