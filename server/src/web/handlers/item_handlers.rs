// server/src/web/handlers/item_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::{check_width, present};
use crate::errors::{AppError, Result};
use crate::models::{ItemView, NewItem, MAX_NAME_CHARS};
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct CreateItemPayload {
  pub name: Option<String>,
  pub price: Option<f64>,
  pub category_id: Option<i32>,
  pub user_id: Option<i32>,
}

#[instrument(name = "handler::create_item", skip(app_state, _auth_user))]
pub async fn create_item_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
  payload: web::Json<CreateItemPayload>,
) -> Result<HttpResponse> {
  let payload = payload.into_inner();
  let (Some(name), Some(price), Some(category_id), Some(user_id)) =
    (present(payload.name), payload.price, payload.category_id, payload.user_id)
  else {
    return Err(AppError::Validation(
      "Name, price, category_id, and user_id are required".to_string(),
    ));
  };
  check_width("Name", &name, MAX_NAME_CHARS)?;
  if !price.is_finite() {
    return Err(AppError::Validation("Price must be a finite number".to_string()));
  }

  let item = app_state
    .store
    .insert_item(NewItem {
      name,
      price,
      category_id,
      user_id,
    })
    .await?;
  info!(item_id = item.id, "Item created.");
  Ok(HttpResponse::Created().json(ItemView::from(&item)))
}

pub async fn list_items_handler(app_state: web::Data<AppState>, _auth_user: AuthenticatedUser) -> Result<HttpResponse> {
  let items = app_state.store.list_items().await?;
  let views: Vec<ItemView> = items.iter().map(ItemView::from).collect();
  Ok(HttpResponse::Ok().json(views))
}

#[instrument(name = "handler::delete_item", skip(app_state, _auth_user, path), fields(item_id = %path.as_ref()))]
pub async fn delete_item_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
  path: web::Path<i32>,
) -> Result<HttpResponse> {
  app_state.store.delete_item(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({"msg": "Item deleted"})))
}
