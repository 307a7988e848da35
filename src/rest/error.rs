use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::render::RenderError;
use crate::repository::RepositoryError;

use super::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Repository(RepositoryError::NoResultFound) => StatusCode::NOT_FOUND,
            ApiError::Repository(RepositoryError::InvalidPagination(_)) => StatusCode::BAD_REQUEST,
            ApiError::Repository(_) | ApiError::Render(_) | ApiError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            log::error!("request failed: {}", self);
            "internal error".to_string()
        } else {
            log::warn!("request rejected: {}", self);
            self.to_string()
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}
