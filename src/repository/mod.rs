// Table-scoped data access on top of a storage connection.
mod error;
mod table;

pub use error::RepositoryError;
pub use table::{get_single_row, get_single_row_or_null, TableRepository};

pub type RepositoryResult<T> = Result<T, RepositoryError>;
