#![allow(dead_code)]

use std::path::PathBuf;

use rusqlite::types::Value;
use table_pager::{Connection, Row, SqliteConnection, TableRepository};

pub const SCHEMA: &str = r#"
    CREATE TABLE books (
        isbn TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        year INTEGER
    );
"#;

pub fn scratch_db(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("books.sqlite");
    let conn = SqliteConnection::open(&path).expect("open scratch db");
    conn.execute_batch(SCHEMA).expect("create schema");
    path
}

pub fn book(isbn: &str, title: &str, author: &str, year: i64) -> Row {
    let mut row = Row::new();
    row.insert("isbn".into(), Value::Text(isbn.into()));
    row.insert("title".into(), Value::Text(title.into()));
    row.insert("author".into(), Value::Text(author.into()));
    row.insert("year".into(), Value::Integer(year));
    row
}

pub fn books_repo<C: Connection>(conn: C) -> TableRepository<C> {
    TableRepository::new(conn, "books", "isbn")
}

/// Insert `n` books, every third one by the same author.
pub fn seed<C: Connection>(repo: &TableRepository<C>, n: usize) {
    for i in 0..n {
        let author = if i % 3 == 0 { "Le Guin" } else { "Other" };
        repo.insert(&book(
            &format!("isbn-{i:04}"),
            &format!("Title {i}"),
            author,
            1960 + i as i64,
        ))
        .expect("seed insert");
    }
}
