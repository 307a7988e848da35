pub mod query_builder;
pub mod sqlite;
pub mod traits;

pub use query_builder::QueryBuilder;
pub use sqlite::SqliteConnection;
pub use traits::{Connection, Filters, Params, Row, StorageError, StorageResult};
