use rusqlite::types::{Type, Value};

use crate::pagination::{PaginatedResult, Pagination};
use crate::storage::traits::quote_identifier;
use crate::storage::{Connection, Filters, Row, StorageError};

use super::{RepositoryError, RepositoryResult};

const TABLE_ALIAS: &str = "t";
const COUNT_ALIAS: &str = "c";

/// Generic access to one table keyed by a single primary-key column.
pub struct TableRepository<C> {
    connection: C,
    table_name: String,
    primary_key: String,
}

impl<C: Connection> TableRepository<C> {
    pub fn new(connection: C, table_name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            connection,
            table_name: table_name.into(),
            primary_key: primary_key.into(),
        }
    }

    /// The underlying storage connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Look up a row by primary key, `None` when absent.
    pub fn find_by_id(&self, id: impl Into<Value>) -> RepositoryResult<Option<Row>> {
        let rows = self.fetch_by_id(id.into())?;
        get_single_row_or_null(rows)
    }

    /// Look up a row by primary key, failing with `NoResultFound` when absent.
    pub fn get_by_id(&self, id: impl Into<Value>) -> RepositoryResult<Row> {
        let rows = self.fetch_by_id(id.into())?;
        get_single_row(rows)
    }

    /// Select `columns` (all when empty) from rows equal to every filter.
    pub fn find(
        &self,
        columns: &[&str],
        filters: &Filters,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> RepositoryResult<Vec<Row>> {
        let qb = self
            .connection
            .create_query_builder()
            .select(columns.iter().copied())
            .from(self.table_name.as_str(), TABLE_ALIAS);
        let qb = filters
            .iter()
            .fold(qb, |qb, (column, value)| qb.and_where_eq(column, value.clone()))
            .set_first_result(offset)
            .set_max_results(limit);

        Ok(qb.execute(&self.connection)?)
    }

    pub fn find_count(&self, filters: &Filters) -> RepositoryResult<u64> {
        let qb = self
            .connection
            .create_query_builder()
            .select_count(COUNT_ALIAS)
            .from(self.table_name.as_str(), TABLE_ALIAS);
        let qb = filters
            .iter()
            .fold(qb, |qb, (column, value)| qb.and_where_eq(column, value.clone()));

        let row = get_single_row(qb.execute(&self.connection)?)?;
        match row.get(COUNT_ALIAS) {
            Some(Value::Integer(count)) => Ok(u64::try_from(*count).unwrap_or(0)),
            other => Err(StorageError::from(rusqlite::Error::InvalidColumnType(
                0,
                COUNT_ALIAS.to_string(),
                other.map(Value::data_type).unwrap_or(Type::Null),
            ))
            .into()),
        }
    }

    /// Count, then fetch the requested page. The two queries are not wrapped
    /// in a transaction, so the count may drift from the page under
    /// concurrent writes.
    pub fn find_paginated_result(
        &self,
        columns: &[&str],
        filters: &Filters,
        page: u64,
        per_page: u64,
    ) -> RepositoryResult<PaginatedResult> {
        let request = Pagination::new(page, per_page, 0)?;
        let count = self.find_count(filters)?;
        let results = self.find(columns, filters, Some(request.offset()), Some(per_page))?;
        log::debug!(
            "{}: page {} of {} rows ({} on page)",
            self.table_name,
            page,
            count,
            results.len()
        );

        Ok(PaginatedResult::new(request.with_total_count(count), results))
    }

    pub fn find_all(&self) -> RepositoryResult<Vec<Row>> {
        let sql = format!("SELECT * FROM {}", quote_identifier(&self.table_name));
        Ok(self.connection.fetch_all(&sql, &Vec::new())?)
    }

    pub fn insert(&self, row: &Row) -> RepositoryResult<usize> {
        Ok(self.connection.insert(&self.table_name, row)?)
    }

    pub fn update(&self, values: &Row, criteria: &Filters) -> RepositoryResult<usize> {
        Ok(self.connection.update(&self.table_name, values, criteria)?)
    }

    pub fn delete(&self, id: impl Into<Value>) -> RepositoryResult<usize> {
        let mut criteria = Filters::new();
        criteria.insert(self.primary_key.clone(), id.into());
        Ok(self.connection.delete(&self.table_name, &criteria)?)
    }

    pub fn begin_transaction(&self) -> RepositoryResult<()> {
        Ok(self.connection.begin_transaction()?)
    }

    pub fn commit_transaction(&self) -> RepositoryResult<()> {
        Ok(self.connection.commit()?)
    }

    pub fn rollback_transaction(&self) -> RepositoryResult<()> {
        Ok(self.connection.roll_back()?)
    }

    fn fetch_by_id(&self, id: Value) -> RepositoryResult<Vec<Row>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = :id",
            quote_identifier(&self.table_name),
            quote_identifier(&self.primary_key)
        );
        Ok(self
            .connection
            .fetch_all(&sql, &vec![(":id".to_string(), id)])?)
    }
}

/// Exactly one row, or `NoResultFound` / `TooManyResults`.
pub fn get_single_row(rows: Vec<Row>) -> RepositoryResult<Row> {
    get_single_row_or_null(rows)?.ok_or(RepositoryError::NoResultFound)
}

/// At most one row; more than one means the key assumption is broken.
pub fn get_single_row_or_null(rows: Vec<Row>) -> RepositoryResult<Option<Row>> {
    if rows.len() > 1 {
        return Err(RepositoryError::TooManyResults { count: rows.len() });
    }
    Ok(rows.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteConnection;

    fn repo_with(schema: &str) -> TableRepository<SqliteConnection> {
        let conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute_batch(schema).unwrap();
        TableRepository::new(conn, "items", "id")
    }

    fn items_repo() -> TableRepository<SqliteConnection> {
        repo_with(
            r#"
            CREATE TABLE items (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL
            );
            "#,
        )
    }

    fn item(id: i64, name: &str, category: &str) -> Row {
        let mut row = Row::new();
        row.insert("id".into(), Value::Integer(id));
        row.insert("name".into(), Value::Text(name.into()));
        row.insert("category".into(), Value::Text(category.into()));
        row
    }

    fn filter(column: &str, value: Value) -> Filters {
        let mut filters = Filters::new();
        filters.insert(column.to_string(), value);
        filters
    }

    fn seed(repo: &TableRepository<SqliteConnection>, n: i64) {
        for id in 1..=n {
            let category = if id % 3 == 0 { "fizz" } else { "plain" };
            repo.insert(&item(id, &format!("item-{id}"), category)).unwrap();
        }
    }

    #[test]
    fn get_single_row_policy() {
        assert!(matches!(
            get_single_row(Vec::new()),
            Err(RepositoryError::NoResultFound)
        ));
        assert_eq!(get_single_row(vec![item(1, "a", "x")]).unwrap(), item(1, "a", "x"));
        let err = get_single_row(vec![item(1, "a", "x"), item(1, "b", "x")]).unwrap_err();
        assert!(matches!(err, RepositoryError::TooManyResults { count: 2 }));
        assert_eq!(
            err.to_string(),
            "Found 2 results but only max one was expected"
        );
    }

    #[test]
    fn get_single_row_or_null_policy() {
        assert_eq!(get_single_row_or_null(Vec::new()).unwrap(), None);
        assert!(matches!(
            get_single_row_or_null(vec![item(1, "a", "x"), item(2, "b", "x"), item(3, "c", "x")]),
            Err(RepositoryError::TooManyResults { count: 3 })
        ));
    }

    #[test]
    fn insert_then_get_by_id_round_trips() {
        let repo = items_repo();
        let row = item(42, "lamp", "home");
        assert_eq!(repo.insert(&row).unwrap(), 1);
        assert_eq!(repo.get_by_id(42).unwrap(), row);
    }

    #[test]
    fn find_by_id_absent_is_none_and_get_by_id_is_error() {
        let repo = items_repo();
        assert_eq!(repo.find_by_id(7).unwrap(), None);
        assert!(matches!(repo.get_by_id(7), Err(RepositoryError::NoResultFound)));
    }

    #[test]
    fn duplicate_keys_are_too_many_results() {
        let repo = repo_with("CREATE TABLE items (id INTEGER, name TEXT, category TEXT);");
        repo.insert(&item(1, "a", "x")).unwrap();
        repo.insert(&item(1, "b", "x")).unwrap();

        assert!(matches!(
            repo.get_by_id(1),
            Err(RepositoryError::TooManyResults { count: 2 })
        ));
        assert!(matches!(
            repo.find_by_id(1),
            Err(RepositoryError::TooManyResults { count: 2 })
        ));
    }

    #[test]
    fn find_count_matches_unbounded_find() {
        let repo = items_repo();
        seed(&repo, 10);

        let cases = vec![
            Filters::new(),
            filter("category", Value::Text("fizz".into())),
            filter("category", Value::Text("none".into())),
        ];
        for filters in cases {
            let count = repo.find_count(&filters).unwrap();
            let rows = repo.find(&[], &filters, None, None).unwrap();
            assert_eq!(count as usize, rows.len());
        }
    }

    #[test]
    fn find_selects_requested_columns_only() {
        let repo = items_repo();
        seed(&repo, 2);
        let rows = repo.find(&["name"], &Filters::new(), None, None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let repo = items_repo();
        seed(&repo, 9);
        let mut filters = filter("category", Value::Text("fizz".into()));
        filters.insert("id".into(), Value::Integer(6));
        let rows = repo.find(&[], &filters, None, None).unwrap();
        assert_eq!(rows, vec![item(6, "item-6", "fizz")]);
    }

    #[test]
    fn paginated_result_sizes_every_page() {
        let repo = items_repo();
        seed(&repo, 23);
        let per_page = 5u64;
        for page in 1..=7u64 {
            let result = repo
                .find_paginated_result(&[], &Filters::new(), page, per_page)
                .unwrap();
            let skipped = (page - 1) * per_page;
            let expected = per_page.min(23u64.saturating_sub(skipped));
            assert_eq!(result.results().len() as u64, expected, "page {page}");
            assert_eq!(result.pagination().current_page(), page);
            assert_eq!(result.pagination().total_count(), 23);
            assert_eq!(result.pagination().total_pages(), 5);
        }
    }

    #[test]
    fn paginated_result_rejects_zero_page() {
        let repo = items_repo();
        assert!(matches!(
            repo.find_paginated_result(&[], &Filters::new(), 0, 10),
            Err(RepositoryError::InvalidPagination(_))
        ));
    }

    #[test]
    fn pages_beyond_sqlite_integer_range_are_empty() {
        let repo = items_repo();
        seed(&repo, 4);

        for page in [1_000_000_000_000_000_000, u64::MAX] {
            let result = repo
                .find_paginated_result(&[], &Filters::new(), page, 20)
                .unwrap();
            assert!(result.results().is_empty());
            assert_eq!(result.pagination().current_page(), page);
            assert_eq!(result.pagination().total_count(), 4);
        }
    }

    #[test]
    fn text_keys_with_leading_zeros_are_found() {
        let repo = repo_with("CREATE TABLE items (id TEXT PRIMARY KEY, name TEXT);");
        let mut row = Row::new();
        row.insert("id".into(), Value::Text("007".into()));
        row.insert("name".into(), Value::Text("bond".into()));
        repo.insert(&row).unwrap();

        let id = crate::types::parse_scalar("007");
        assert_eq!(repo.get_by_id(id).unwrap(), row);
    }

    #[test]
    fn update_and_delete_are_scoped_to_table() {
        let repo = items_repo();
        seed(&repo, 3);

        let mut values = Row::new();
        values.insert("name".into(), Value::Text("renamed".into()));
        let updated = repo
            .update(&values, &filter("id", Value::Integer(2)))
            .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(
            repo.get_by_id(2).unwrap()["name"],
            Value::Text("renamed".into())
        );

        assert_eq!(repo.delete(2).unwrap(), 1);
        assert_eq!(repo.delete(2).unwrap(), 0);
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn rollback_transaction_discards_inserts() {
        let repo = items_repo();
        repo.begin_transaction().unwrap();
        repo.insert(&item(1, "a", "x")).unwrap();
        repo.rollback_transaction().unwrap();
        assert!(repo.find_all().unwrap().is_empty());

        repo.begin_transaction().unwrap();
        repo.insert(&item(2, "b", "x")).unwrap();
        repo.commit_transaction().unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn storage_errors_propagate_unmodified() {
        let conn = SqliteConnection::open_in_memory().unwrap();
        let repo = TableRepository::new(&conn, "missing", "id");
        let err = repo.find_all().unwrap_err();
        match err {
            RepositoryError::Storage(StorageError::Sqlite(inner)) => {
                assert!(inner.to_string().contains("no such table"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
