use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u64),
    #[error("per page must be at least 1, got {0}")]
    InvalidPerPage(u64),
}
