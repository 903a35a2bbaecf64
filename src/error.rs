//! Error type shared by the store and the HTTP layer.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  /// The requested record does not exist.
  #[error("{0}")]
  NotFound(String),

  /// Any failure reading or writing the store.
  #[error("{0}")]
  Storage(#[from] sqlx::Error),
}

impl AppError {
  pub fn email_not_found() -> Self {
    AppError::NotFound("Email not found".to_string())
  }

  pub fn item_not_found() -> Self {
    AppError::NotFound("Item not found".to_string())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    if let AppError::Storage(e) = &self {
      error!("storage error: {e}");
    }
    (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
  }
}
