// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::present;
use crate::errors::{AppError, Result};
use crate::models::UserView;
use crate::services::credentials;
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct CredentialsPayload {
  pub email: Option<String>,
  pub password: Option<String>,
}

impl CredentialsPayload {
  fn into_parts(self) -> Result<(String, String)> {
    match (present(self.email), self.password.filter(|p| !p.is_empty())) {
      (Some(email), Some(password)) => Ok((email, password)),
      _ => Err(AppError::Validation("Email and password are required".to_string())),
    }
  }
}

#[instrument(name = "handler::register", skip(app_state, payload))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse> {
  let (email, password) = payload.into_inner().into_parts()?;
  let user = credentials::register(app_state.store.as_ref(), &email, &password).await?;
  info!(user_id = user.id, "Registration complete.");
  Ok(HttpResponse::Created().json(json!({"msg": "User created successfully"})))
}

#[instrument(name = "handler::login", skip(app_state, payload))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CredentialsPayload>,
) -> Result<HttpResponse> {
  let (email, password) = payload.into_inner().into_parts()?;
  let token = credentials::authenticate(app_state.store.as_ref(), &app_state.tokens, &email, &password).await?;
  Ok(HttpResponse::Ok().json(json!({"msg": "ok", "access_token": token})))
}

pub async fn private_handler(auth_user: AuthenticatedUser) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "msg": "This is a private message",
    "logged_in_as": auth_user.email,
  }))
}

/// The caller's own record, favorites embedded.
#[instrument(name = "handler::me", skip(app_state, auth_user), fields(email = %auth_user.email))]
pub async fn me_handler(app_state: web::Data<AppState>, auth_user: AuthenticatedUser) -> Result<HttpResponse> {
  let store = app_state.store.as_ref();
  let user = credentials::resolve_user(store, &auth_user.email).await?;
  let favorites = store.list_favorites(user.id).await?;
  Ok(HttpResponse::Ok().json(UserView::new(&user, &favorites)))
}
