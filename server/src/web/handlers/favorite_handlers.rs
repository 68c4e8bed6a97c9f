// server/src/web/handlers/favorite_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::models::CryptoView;
use crate::services::credentials;
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct AddFavoritePayload {
  pub crypto_id: Option<i32>,
}

#[instrument(name = "handler::add_favorite", skip(app_state, auth_user), fields(email = %auth_user.email))]
pub async fn add_favorite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  payload: web::Json<AddFavoritePayload>,
) -> Result<HttpResponse> {
  let crypto_id = payload
    .crypto_id
    .ok_or_else(|| AppError::Validation("crypto_id is required".to_string()))?;

  let store = app_state.store.as_ref();
  let user = credentials::resolve_user(store, &auth_user.email).await?;
  let crypto = store.add_favorite(user.id, crypto_id).await?;

  info!(user_id = user.id, crypto_id, "Favorite added.");
  Ok(HttpResponse::Created().json(json!({
    "msg": "Crypto added to favorites",
    "crypto": CryptoView::from(&crypto),
  })))
}

pub async fn list_favorites_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse> {
  let store = app_state.store.as_ref();
  let user = credentials::resolve_user(store, &auth_user.email).await?;
  let favorites = store.list_favorites(user.id).await?;
  let views: Vec<CryptoView> = favorites.iter().map(CryptoView::from).collect();
  Ok(HttpResponse::Ok().json(views))
}

#[instrument(name = "handler::remove_favorite", skip(app_state, auth_user, path), fields(email = %auth_user.email))]
pub async fn remove_favorite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i32>,
) -> Result<HttpResponse> {
  let crypto_id = path.into_inner();
  let store = app_state.store.as_ref();
  let user = credentials::resolve_user(store, &auth_user.email).await?;
  store.remove_favorite(user.id, crypto_id).await?;
  info!(user_id = user.id, crypto_id, "Favorite removed.");
  Ok(HttpResponse::Ok().json(json!({"msg": "Crypto removed from favorites"})))
}
