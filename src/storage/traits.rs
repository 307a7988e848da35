use indexmap::IndexMap;
use rusqlite::types::Value;

use super::query_builder::QueryBuilder;

/// A single result row: column name to database-native value, in select order.
pub type Row = IndexMap<String, Value>;

/// Column to exact-match value. Shares the row shape so a fetched row can be
/// fed back as a filter.
pub type Filters = IndexMap<String, Value>;

/// Named statement parameters, e.g. `(":id", Value::Integer(1))`.
pub type Params = Vec<(String, Value)>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("refusing to {operation} on table {table} with empty criteria")]
    EmptyCriteria {
        operation: &'static str,
        table: String,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// The database handle a repository talks to.
///
/// Implementations own connectivity and transaction state; callers only see
/// rows and affected-row counts.
pub trait Connection {
    /// Run a parameterized statement and collect every row it yields.
    fn fetch_all(&self, sql: &str, params: &Params) -> StorageResult<Vec<Row>>;

    fn create_query_builder(&self) -> QueryBuilder {
        QueryBuilder::new()
    }

    fn insert(&self, table: &str, row: &Row) -> StorageResult<usize>;

    fn update(&self, table: &str, values: &Row, criteria: &Filters) -> StorageResult<usize>;

    fn delete(&self, table: &str, criteria: &Filters) -> StorageResult<usize>;

    fn begin_transaction(&self) -> StorageResult<()>;

    fn commit(&self) -> StorageResult<()>;

    fn roll_back(&self) -> StorageResult<()>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn fetch_all(&self, sql: &str, params: &Params) -> StorageResult<Vec<Row>> {
        (**self).fetch_all(sql, params)
    }

    fn create_query_builder(&self) -> QueryBuilder {
        (**self).create_query_builder()
    }

    fn insert(&self, table: &str, row: &Row) -> StorageResult<usize> {
        (**self).insert(table, row)
    }

    fn update(&self, table: &str, values: &Row, criteria: &Filters) -> StorageResult<usize> {
        (**self).update(table, values, criteria)
    }

    fn delete(&self, table: &str, criteria: &Filters) -> StorageResult<usize> {
        (**self).delete(table, criteria)
    }

    fn begin_transaction(&self) -> StorageResult<()> {
        (**self).begin_transaction()
    }

    fn commit(&self) -> StorageResult<()> {
        (**self).commit()
    }

    fn roll_back(&self) -> StorageResult<()> {
        (**self).roll_back()
    }
}

/// Double-quote an SQL identifier, doubling any embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
