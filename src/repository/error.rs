use thiserror::Error;

use crate::pagination::PaginationError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no result found")]
    NoResultFound,
    #[error("Found {count} results but only max one was expected")]
    TooManyResults { count: usize },
    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),
    /// Driver failures pass through untouched.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::Storage(StorageError::Sqlite(err))
    }
}
