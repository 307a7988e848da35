use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use indexmap::IndexMap;

use crate::{
    pagination::PaginatedResult,
    render::{html::escape_attr, RouteParams},
    repository::{RepositoryResult, TableRepository},
    storage::{Filters, SqliteConnection},
    types::{parse_scalar, row_to_json, value_to_text},
};

use super::{
    error::ApiError,
    models::{ErrorResponse, HealthResponse, RowsResponse},
    AppState, BROWSE_ROUTE, ROWS_ROUTE,
};

/// Query string split into paging and equality filters.
#[derive(Debug, PartialEq)]
struct PageQuery {
    page: u64,
    per_page: u64,
    filters: Filters,
    /// Everything except `page`, carried into generated links.
    link_params: RouteParams,
}

impl PageQuery {
    fn parse(query: IndexMap<String, String>, default_per_page: u64) -> Result<Self, ApiError> {
        let mut page = 1;
        let mut per_page = default_per_page;
        let mut filters = Filters::new();
        let mut link_params = RouteParams::new();

        for (key, value) in query {
            match key.as_str() {
                "page" => page = parse_positive("page", &value)?,
                "per_page" => {
                    per_page = parse_positive("per_page", &value)?;
                    link_params.insert(key, value);
                }
                _ => {
                    filters.insert(key.clone(), parse_scalar(&value));
                    link_params.insert(key, value);
                }
            }
        }

        Ok(Self {
            page,
            per_page,
            filters,
            link_params,
        })
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::BadRequest(format!(
            "{name} must be a positive integer, got {raw:?}"
        ))),
    }
}

/// Run a repository call on the blocking pool with a fresh connection.
async fn with_repository<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TableRepository<SqliteConnection>) -> RepositoryResult<T> + Send + 'static,
{
    let db_path = state.db_path.clone();
    let table = state.table.clone();
    let primary_key = state.primary_key.clone();

    let result = tokio::task::spawn_blocking(move || {
        let _span = ::tracing::debug_span!("repository", table = %table).entered();
        let conn = SqliteConnection::open(&db_path)?;
        let repo = TableRepository::new(conn, table, primary_key);
        f(&repo)
    })
    .await?;
    Ok(result?)
}

async fn load_page(state: &AppState, query: &PageQuery) -> Result<PaginatedResult, ApiError> {
    let filters = query.filters.clone();
    let (page, per_page) = (query.page, query.per_page);
    with_repository(state, move |repo| {
        repo.find_paginated_result(&[], &filters, page, per_page)
    })
    .await
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_rows(
    State(state): State<AppState>,
    Query(query): Query<IndexMap<String, String>>,
) -> Result<Json<RowsResponse>, ApiError> {
    let query = PageQuery::parse(query, state.per_page)?;
    let result = load_page(&state, &query).await?;
    let (pagination, rows) = result.into_parts();
    let links = state
        .renderer
        .links(&pagination, ROWS_ROUTE, &query.link_params)?;

    Ok(Json(RowsResponse {
        table: state.table.clone(),
        pagination,
        rows: rows.iter().map(row_to_json).collect(),
        links,
    }))
}

pub async fn get_row(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_scalar(&id);
    let row = with_repository(&state, move |repo| repo.get_by_id(id)).await?;
    Ok(Json(row_to_json(&row)))
}

pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<IndexMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let query = PageQuery::parse(query, state.per_page)?;
    let result = load_page(&state, &query).await?;
    let controls = state
        .renderer
        .pagination(result.pagination(), BROWSE_ROUTE, &query.link_params)?;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_attr(&state.table)));
    html.push_str("</head>\n<body>\n<table class=\"table\">\n");

    if let Some(first) = result.results().first() {
        html.push_str("<thead><tr>");
        for column in first.keys() {
            html.push_str(&format!("<th>{}</th>", escape_attr(column)));
        }
        html.push_str("</tr></thead>\n");
    }
    html.push_str("<tbody>\n");
    for row in result.results() {
        html.push_str("<tr>");
        for value in row.values() {
            html.push_str(&format!("<td>{}</td>", escape_attr(&value_to_text(value))));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(controls.as_str());
    html.push_str("</body>\n</html>\n");

    Ok(Html(html))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::Value;

    fn query(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn page_query_defaults() {
        let q = PageQuery::parse(query(&[]), 25).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 25);
        assert!(q.filters.is_empty());
        assert!(q.link_params.is_empty());
    }

    #[test]
    fn page_query_splits_filters_from_paging() {
        let q = PageQuery::parse(
            query(&[("category", "fizz"), ("page", "2"), ("per_page", "5"), ("id", "3")]),
            25,
        )
        .unwrap();
        assert_eq!(q.page, 2);
        assert_eq!(q.per_page, 5);
        assert_eq!(q.filters.get("category"), Some(&Value::Text("fizz".into())));
        assert_eq!(q.filters.get("id"), Some(&Value::Integer(3)));
        assert!(!q.link_params.contains_key("page"));
        assert_eq!(q.link_params.get("per_page").map(String::as_str), Some("5"));
    }

    #[test]
    fn page_query_rejects_non_positive_paging() {
        assert!(matches!(
            PageQuery::parse(query(&[("page", "0")]), 10),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            PageQuery::parse(query(&[("per_page", "x")]), 10),
            Err(ApiError::BadRequest(_))
        ));
    }
}
