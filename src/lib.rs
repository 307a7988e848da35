pub mod app;
pub mod cli;
pub mod commands;
pub mod context;
pub mod pagination;
pub mod render;
pub mod repository;
pub mod rest;
pub mod storage;
pub mod tracing;
pub mod types;

pub use pagination::{PaginatedResult, Pagination, PaginationError};
pub use render::{BootstrapPaginationExtension, PaginationRenderer, SafeHtml};
pub use repository::{RepositoryError, RepositoryResult, TableRepository};
pub use storage::{Connection, Filters, Row, SqliteConnection};
