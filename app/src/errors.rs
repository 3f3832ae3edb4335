// productvault/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use vault_saga::SagaError;

use crate::models::timestamp;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Unknown sort field: {0}")]
  InvalidSortField(String),

  #[error("File '{file_name}' exceeds the upload limit of {limit} bytes")]
  UploadTooLarge { file_name: String, limit: usize },

  #[error("Multipart Error: {0}")]
  Multipart(String),

  #[error("Storage Error: {0}")]
  Storage(#[from] std::io::Error),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Saga Error: {source}")]
  Saga {
    #[from]
    source: SagaError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub timestamp: String,
  pub status: u16,
  pub error: &'static str,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
}

impl AppError {
  /// Attaches the request path so the error body can report it.
  pub fn at(self, req: &HttpRequest) -> ApiError {
    ApiError {
      error: self,
      path: req.path().to_string(),
    }
  }

  fn category(&self) -> (StatusCode, &'static str) {
    match self {
      AppError::Validation(_) | AppError::InvalidSortField(_) | AppError::Multipart(_) => {
        (StatusCode::BAD_REQUEST, "Bad Request")
      }
      AppError::UploadTooLarge { .. } => (StatusCode::EXPECTATION_FAILED, "File Too Large"),
      AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "File Processing Error"),
      _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
    }
  }

  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Multipart(m) => m.clone(),
      AppError::InvalidSortField(field) => format!("No property '{}' found for type 'Product'", field),
      AppError::UploadTooLarge { .. } => "One or more files exceed the maximum size limit.".to_string(),
      AppError::Storage(e) => format!("Could not upload files: {}", e),
      AppError::Sqlx(_) | AppError::Migration(_) => "Database operation failed".to_string(),
      other => other.to_string(),
    }
  }

  fn render(&self, path: Option<String>) -> HttpResponse {
    let (status, error) = self.category();
    if status.is_server_error() {
      tracing::error!(application_error = %self, path = ?path, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, path = ?path, "Rejecting request");
    }

    HttpResponse::build(status).json(ErrorResponse {
      timestamp: timestamp::format(&timestamp::now()),
      status: status.as_u16(),
      error,
      message: self.public_message(),
      path,
    })
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    self.category().0
  }

  fn error_response(&self) -> HttpResponse {
    self.render(None)
  }
}

/// An `AppError` bound to the path of the request that produced it.
#[derive(Debug)]
pub struct ApiError {
  pub error: AppError,
  pub path: String,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} (path: {})", self.error, self.path)
  }
}

impl std::error::Error for ApiError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.error)
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    self.error.status_code()
  }

  fn error_response(&self) -> HttpResponse {
    self.error.render(Some(self.path.clone()))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
