// server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::{check_width, present};
use crate::errors::{AppError, Result};
use crate::models::{CategoryView, NewCategory, MAX_NAME_CHARS};
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct CreateCategoryPayload {
  pub name: Option<String>,
  pub user_id: Option<i32>,
}

#[instrument(name = "handler::create_category", skip(app_state, _auth_user))]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
  payload: web::Json<CreateCategoryPayload>,
) -> Result<HttpResponse> {
  let payload = payload.into_inner();
  let (Some(name), Some(user_id)) = (present(payload.name), payload.user_id) else {
    return Err(AppError::Validation("Name and user_id are required".to_string()));
  };
  check_width("Name", &name, MAX_NAME_CHARS)?;

  let category = app_state.store.insert_category(NewCategory { name, user_id }).await?;
  info!(category_id = category.id, "Category created.");
  Ok(HttpResponse::Created().json(CategoryView::from(&category)))
}

pub async fn list_categories_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
) -> Result<HttpResponse> {
  let categories = app_state.store.list_categories().await?;
  let views: Vec<CategoryView> = categories.iter().map(CategoryView::from).collect();
  Ok(HttpResponse::Ok().json(views))
}

#[instrument(name = "handler::delete_category", skip(app_state, _auth_user, path), fields(category_id = %path.as_ref()))]
pub async fn delete_category_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
  path: web::Path<i32>,
) -> Result<HttpResponse> {
  app_state.store.delete_category(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({"msg": "Category deleted"})))
}
