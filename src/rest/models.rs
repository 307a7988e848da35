use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::render::PageLink;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsResponse {
    pub table: String,
    pub pagination: Pagination,
    pub rows: Vec<serde_json::Value>,
    pub links: Vec<PageLink>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
