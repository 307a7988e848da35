use std::sync::Arc;

use crate::{
    context,
    render::{BootstrapPaginationExtension, RouteTable},
    repository::TableRepository,
    rest::{self, AppState},
    storage::SqliteConnection,
};
use anyhow::{Context, Result};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    if let Some(parent) = ctx.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn open_repository(ctx: &context::Context) -> Result<TableRepository<SqliteConnection>> {
    let conn = SqliteConnection::open(&ctx.db_path)
        .with_context(|| format!("opening {}", ctx.db_path.display()))?;
    Ok(TableRepository::new(
        conn,
        ctx.table.clone(),
        ctx.primary_key.clone(),
    ))
}

pub fn build_routes() -> RouteTable {
    RouteTable::new()
        .with_route(rest::ROWS_ROUTE, "/rows")
        .with_route(rest::BROWSE_ROUTE, "/browse")
}

pub fn build_renderer() -> BootstrapPaginationExtension<RouteTable> {
    BootstrapPaginationExtension::new(build_routes())
}

pub fn build_state(ctx: &context::Context) -> AppState {
    AppState {
        db_path: ctx.db_path.clone(),
        table: ctx.table.clone(),
        primary_key: ctx.primary_key.clone(),
        per_page: ctx.per_page,
        renderer: Arc::new(build_renderer()),
        started_at: std::time::SystemTime::now(),
    }
}
