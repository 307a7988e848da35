mod common;

use std::cell::RefCell;

use table_pager::{
    storage::{Params, StorageResult},
    Connection, Filters, Row, SqliteConnection,
};

use common::{books_repo, seed, SCHEMA};

/// Wraps a real connection and records every read statement.
struct Recording {
    inner: SqliteConnection,
    statements: RefCell<Vec<String>>,
}

impl Recording {
    fn new() -> Self {
        let inner = SqliteConnection::open_in_memory().unwrap();
        inner.execute_batch(SCHEMA).unwrap();
        Self {
            inner,
            statements: RefCell::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<String> {
        self.statements.borrow_mut().drain(..).collect()
    }
}

impl Connection for Recording {
    fn fetch_all(&self, sql: &str, params: &Params) -> StorageResult<Vec<Row>> {
        self.statements.borrow_mut().push(sql.to_string());
        self.inner.fetch_all(sql, params)
    }

    fn insert(&self, table: &str, row: &Row) -> StorageResult<usize> {
        self.inner.insert(table, row)
    }

    fn update(&self, table: &str, values: &Row, criteria: &Filters) -> StorageResult<usize> {
        self.inner.update(table, values, criteria)
    }

    fn delete(&self, table: &str, criteria: &Filters) -> StorageResult<usize> {
        self.inner.delete(table, criteria)
    }

    fn begin_transaction(&self) -> StorageResult<()> {
        self.inner.begin_transaction()
    }

    fn commit(&self) -> StorageResult<()> {
        self.inner.commit()
    }

    fn roll_back(&self) -> StorageResult<()> {
        self.inner.roll_back()
    }
}

#[test]
fn paginated_find_is_one_count_then_one_page_query() {
    let conn = Recording::new();
    let repo = books_repo(&conn);
    seed(&repo, 12);
    conn.take();

    repo.find_paginated_result(&[], &Filters::new(), 3, 5).unwrap();
    let statements = conn.take();
    assert_eq!(
        statements,
        vec![
            r#"SELECT COUNT(*) AS "c" FROM "books" "t""#.to_string(),
            r#"SELECT * FROM "books" "t" LIMIT 5 OFFSET 10"#.to_string(),
        ]
    );
}

#[test]
fn plain_find_issues_no_count() {
    let conn = Recording::new();
    let repo = books_repo(&conn);
    seed(&repo, 3);
    conn.take();

    repo.find(&["title"], &Filters::new(), None, None).unwrap();
    let statements = conn.take();
    assert_eq!(statements.len(), 1);
    assert!(!statements[0].contains("COUNT"));
}

#[test]
fn id_lookups_bind_the_primary_key() {
    let conn = Recording::new();
    let repo = books_repo(&conn);
    seed(&repo, 1);
    conn.take();

    assert!(repo.find_by_id("isbn-0000".to_string()).unwrap().is_some());
    assert_eq!(
        conn.take(),
        vec![r#"SELECT * FROM "books" WHERE "isbn" = :id"#.to_string()]
    );
}
