// server/src/web/auth.rs

//! Authorization gate. Any handler taking an [`AuthenticatedUser`] argument
//! only runs once the request's bearer token has been verified.

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

/// Identity proven by the bearer token: the user's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub email: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate_request(req))
  }
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))?;

  let token = bearer_token(req)?;
  let claims = state.tokens.verify(token)?;
  Ok(AuthenticatedUser { email: claims.sub })
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
  let value = req
    .headers()
    .get(header::AUTHORIZATION)
    .ok_or_else(|| {
      warn!(path = %req.path(), "Request without Authorization header.");
      AppError::Auth("Missing Authorization Header".to_string())
    })?
    .to_str()
    .map_err(|_| AppError::Auth("Malformed Authorization Header".to_string()))?;

  let token = value
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or_else(|| AppError::Auth("Authorization Header must be 'Bearer <token>'".to_string()))?;
  Ok(token)
}
