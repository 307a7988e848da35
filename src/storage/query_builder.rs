// Minimal SELECT composer: column list or COUNT(*), equality filters, paging.
use rusqlite::types::Value;

use super::traits::{quote_identifier, Connection, Params, Row, StorageResult};

#[derive(Clone, Debug, PartialEq)]
enum Selection {
    All,
    Columns(Vec<String>),
    Count { alias: String },
}

#[derive(Clone, Debug)]
pub struct QueryBuilder {
    selection: Selection,
    from: Option<(String, String)>,
    conditions: Vec<String>,
    params: Params,
    first_result: Option<u64>,
    max_results: Option<u64>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            selection: Selection::All,
            from: None,
            conditions: Vec::new(),
            params: Vec::new(),
            first_result: None,
            max_results: None,
        }
    }

    pub fn select_all(mut self) -> Self {
        self.selection = Selection::All;
        self
    }

    /// Select the given columns; an empty list falls back to `*`.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        self.selection = if columns.is_empty() {
            Selection::All
        } else {
            Selection::Columns(columns)
        };
        self
    }

    pub fn select_count(mut self, alias: impl Into<String>) -> Self {
        self.selection = Selection::Count {
            alias: alias.into(),
        };
        self
    }

    pub fn from(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.from = Some((table.into(), alias.into()));
        self
    }

    /// AND an `alias.column = :param` condition onto the WHERE clause.
    pub fn and_where_eq(mut self, column: &str, value: Value) -> Self {
        let name = format!(":p{}", self.params.len());
        let qualified = match &self.from {
            Some((_, alias)) => format!("{}.{}", quote_identifier(alias), quote_identifier(column)),
            None => quote_identifier(column),
        };
        self.conditions.push(format!("{qualified} = {name}"));
        self.params.push((name, value));
        self
    }

    pub fn set_first_result(mut self, offset: Option<u64>) -> Self {
        self.first_result = offset;
        self
    }

    pub fn set_max_results(mut self, limit: Option<u64>) -> Self {
        self.max_results = limit;
        self
    }

    pub fn parameters(&self) -> &Params {
        &self.params
    }

    pub fn sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        match &self.selection {
            Selection::All => sql.push('*'),
            Selection::Columns(columns) => {
                let list = columns
                    .iter()
                    .map(|c| quote_identifier(c))
                    .collect::<Vec<_>>()
                    .join(", ");
                sql.push_str(&list);
            }
            Selection::Count { alias } => {
                sql.push_str("COUNT(*) AS ");
                sql.push_str(&quote_identifier(alias));
            }
        }

        if let Some((table, alias)) = &self.from {
            sql.push_str(" FROM ");
            sql.push_str(&quote_identifier(table));
            sql.push(' ');
            sql.push_str(&quote_identifier(alias));
        }

        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }

        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
        match (
            self.max_results.map(sql_bound),
            self.first_result.map(sql_bound),
        ) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }

        sql
    }

    pub fn execute<C: Connection + ?Sized>(&self, conn: &C) -> StorageResult<Vec<Row>> {
        conn.fetch_all(&self.sql(), &self.params)
    }
}

/// SQLite integers are signed; anything larger reads as a real and fails.
fn sql_bound(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
