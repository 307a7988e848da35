use std::path::Path;
use std::time::Duration;

use rusqlite::{types::Value, ToSql};

use super::traits::{
    quote_identifier, Connection, Filters, Params, Row, StorageError, StorageResult,
};

/// A single SQLite handle. Transactions started through [`Connection`] stay
/// open on this handle until committed or rolled back.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let conn = rusqlite::Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(Duration::from_millis(500))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: rusqlite::Connection::open_in_memory()?,
        })
    }

    /// Run one or more statements without parameters, e.g. schema setup.
    pub fn execute_batch(&self, sql: &str) -> StorageResult<()> {
        log::debug!("sql batch: {}", sql);
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn execute(&self, sql: &str, params: &Params) -> StorageResult<usize> {
        log::debug!("sql: {} {:?}", sql, params);
        let bound = bind(params);
        let affected = self.conn.execute(sql, bound.as_slice())?;
        Ok(affected)
    }
}

fn bind(params: &Params) -> Vec<(&str, &dyn ToSql)> {
    params
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
        .collect()
}

fn map_row(row: &rusqlite::Row<'_>, names: &[String]) -> rusqlite::Result<Row> {
    let mut out = Row::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let value: Value = row.get(idx)?;
        out.insert(name.clone(), value);
    }
    Ok(out)
}

/// Build `"col" = :prefixN` fragments and their parameters.
fn assignments(columns: &Row, prefix: &str, params: &mut Params) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, (column, value))| {
            let name = format!(":{prefix}{idx}");
            params.push((name.clone(), value.clone()));
            format!("{} = {}", quote_identifier(column), name)
        })
        .collect()
}

impl Connection for SqliteConnection {
    fn fetch_all(&self, sql: &str, params: &Params) -> StorageResult<Vec<Row>> {
        log::debug!("sql: {} {:?}", sql, params);
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let bound = bind(params);
        let rows = stmt
            .query_map(bound.as_slice(), |row| map_row(row, &names))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn insert(&self, table: &str, row: &Row) -> StorageResult<usize> {
        if row.is_empty() {
            let sql = format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table));
            return self.execute(&sql, &Vec::new());
        }

        let mut params = Params::with_capacity(row.len());
        let mut columns = Vec::with_capacity(row.len());
        for (idx, (column, value)) in row.iter().enumerate() {
            let name = format!(":v{idx}");
            columns.push(quote_identifier(column));
            params.push((name, value.clone()));
        }
        let placeholders = params
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table),
            columns.join(", "),
            placeholders
        );
        self.execute(&sql, &params)
    }

    fn update(&self, table: &str, values: &Row, criteria: &Filters) -> StorageResult<usize> {
        if values.is_empty() {
            return Ok(0);
        }

        let mut params = Params::with_capacity(values.len() + criteria.len());
        let set = assignments(values, "s", &mut params);
        let mut sql = format!("UPDATE {} SET {}", quote_identifier(table), set.join(", "));
        if !criteria.is_empty() {
            let conditions = assignments(criteria, "w", &mut params);
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        self.execute(&sql, &params)
    }

    fn delete(&self, table: &str, criteria: &Filters) -> StorageResult<usize> {
        if criteria.is_empty() {
            return Err(StorageError::EmptyCriteria {
                operation: "delete",
                table: table.to_string(),
            });
        }

        let mut params = Params::with_capacity(criteria.len());
        let conditions = assignments(criteria, "w", &mut params);
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            quote_identifier(table),
            conditions.join(" AND ")
        );
        self.execute(&sql, &params)
    }

    fn begin_transaction(&self) -> StorageResult<()> {
        self.execute_batch("BEGIN")
    }

    fn commit(&self) -> StorageResult<()> {
        self.execute_batch("COMMIT")
    }

    fn roll_back(&self) -> StorageResult<()> {
        self.execute_batch("ROLLBACK")
    }
}
