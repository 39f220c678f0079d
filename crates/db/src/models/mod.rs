pub mod page;
pub mod project;
pub mod snippet;

pub use page::{Page, PageVersion, SavePage};
pub use project::{CreateProject, Project, UpdateProject};
pub use snippet::{SaveSnippet, Snippet, SnippetVersion};
