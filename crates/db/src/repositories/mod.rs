pub mod project_repo;
pub mod versioned;

pub use project_repo::ProjectRepo;
pub use versioned::{PageRepo, SaveOutcome, SnippetRepo, VersionedEntity, VersionedRepo};
