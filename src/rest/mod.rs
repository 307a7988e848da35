use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::render::PaginationRenderer;

mod error;
mod handlers;
mod models;

pub use error::ApiError;
pub use models::{ErrorResponse, HealthResponse};

use handlers::{browse, get_row, health, list_rows, not_found};

/// Route names the pagination links are generated against.
pub const ROWS_ROUTE: &str = "rows";
pub const BROWSE_ROUTE: &str = "browse";

#[derive(Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub table: String,
    pub primary_key: String,
    pub per_page: u64,
    pub renderer: Arc<dyn PaginationRenderer>,
    pub started_at: std::time::SystemTime,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rows", get(list_rows))
        .route("/rows/:id", get(get_row))
        .route("/browse", get(browse))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
