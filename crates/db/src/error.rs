use playground_core::error::CoreError;

use crate::store::StoreError;

/// Error returned by repository operations.
///
/// Domain outcomes (not found, validation, conflict) travel as [`CoreError`];
/// backend failures are passed through unchanged as [`StoreError`].
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RepoResult<T> = Result<T, RepoError>;
