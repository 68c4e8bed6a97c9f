// server/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use coinshelf_auth::AuthError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Missing or malformed request fields.
  #[error("Validation Error: {0}")]
  Validation(String),

  /// Missing or invalid credentials or token.
  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Duplicate email, duplicate favorite, or a delete blocked by dependents.
  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Store(#[from] sqlx::Error),

  #[error("Credential Error: {source}")]
  Credential {
    #[from]
    source: AuthError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Message shown to the client under the `msg` key.
  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Conflict(m) => m.clone(),
      AppError::Credential { source } if source.is_credential_rejection() => source.to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Store(_) => "Database operation failed".to_string(),
      AppError::Credential { .. } | AppError::Internal(_) => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Credential { source } if source.is_credential_rejection() => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Store(_) | AppError::Credential { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
      let detail = match self {
        AppError::Config(m) | AppError::Internal(m) => m.clone(),
        AppError::Store(e) => e.to_string(),
        AppError::Credential { source } => source.to_string(),
        _ => self.to_string(),
      };
      HttpResponse::build(status).json(json!({"msg": self.public_message(), "error": detail}))
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
      HttpResponse::build(status).json(json!({"msg": self.public_message()}))
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
