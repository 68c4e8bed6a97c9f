// server/src/web/handlers/health_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

pub async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match app_state.store.ping().await {
    Ok(()) => HttpResponse::Ok().json(json!({"status": "ok", "database": "ok"})),
    Err(e) => {
      error!(error = %e, "Health check could not reach the store.");
      HttpResponse::ServiceUnavailable().json(json!({"status": "degraded", "database": "unavailable"}))
    }
  }
}
