// server/src/web/handlers/crypto_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{check_width, present};
use crate::errors::{AppError, Result};
use crate::models::{CryptoView, NewCrypto, MAX_NAME_CHARS, MAX_SYMBOL_CHARS};
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct CreateCryptoPayload {
  pub name: Option<String>,
  pub symbol: Option<String>,
}

#[instrument(name = "handler::create_crypto", skip(app_state, _auth_user))]
pub async fn create_crypto_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
  payload: web::Json<CreateCryptoPayload>,
) -> Result<HttpResponse> {
  let payload = payload.into_inner();
  let (Some(name), Some(symbol)) = (present(payload.name), present(payload.symbol)) else {
    return Err(AppError::Validation("Name and symbol are required".to_string()));
  };
  // Upper-casing can widen a symbol ("ß" → "SS"), so measure afterwards.
  let symbol = symbol.to_uppercase();
  check_width("Name", &name, MAX_NAME_CHARS)?;
  check_width("Symbol", &symbol, MAX_SYMBOL_CHARS)?;

  let crypto = app_state.store.insert_crypto(NewCrypto { name, symbol }).await?;
  Ok(HttpResponse::Created().json(CryptoView::from(&crypto)))
}

pub async fn list_cryptos_handler(app_state: web::Data<AppState>, _auth_user: AuthenticatedUser) -> Result<HttpResponse> {
  let cryptos = app_state.store.list_cryptos().await?;
  let views: Vec<CryptoView> = cryptos.iter().map(CryptoView::from).collect();
  Ok(HttpResponse::Ok().json(views))
}

pub async fn delete_crypto_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
  path: web::Path<i32>,
) -> Result<HttpResponse> {
  app_state.store.delete_crypto(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({"msg": "Crypto deleted"})))
}
