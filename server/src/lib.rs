// server/src/lib.rs

//! HTTP backend: user registration and login with bearer tokens, plus
//! categories, items and favorite cryptocurrencies behind an authorization
//! gate.

pub mod config;
pub mod errors;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

use actix_files::{Files, NamedFile};
use actix_web::body::MessageBody;
use actix_web::dev::{fn_service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{guard, web as actix_data, App, HttpResponse};
use std::path::PathBuf;

use crate::state::AppState;

/// Builds the application with every route, the extractor configs, request
/// tracing and the front-end fallback.
pub fn build_app(
  app_state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  let static_dir = app_state.config.static_dir.clone();

  let app = App::new()
    .app_data(actix_data::Data::new(app_state))
    .app_data(web::json_config())
    .app_data(web::path_config())
    .wrap(tracing_actix_web::TracingLogger::default())
    .configure(web::configure_app_routes);

  match static_dir {
    // Scopes without a default of their own (`/api`) fall through to the
    // app default, so every unmatched GET lands on index.html.
    Some(dir) => {
      let index = dir.join("index.html");
      app
        .service(
          actix_data::scope("")
            .wrap(DefaultHeaders::new().add((header::CACHE_CONTROL, "max-age=0")))
            .service(front_end_files(dir, index.clone())),
        )
        .default_service(fn_service(move |req: ServiceRequest| serve_index(req, index.clone())))
    }
    None => app.default_service(actix_data::to(not_found)),
  }
}

// Only GET and HEAD reach the bundle; other methods keep the JSON 404.
fn front_end_files(dir: PathBuf, index: PathBuf) -> Files {
  Files::new("/", dir)
    .index_file("index.html")
    .guard(guard::Any(guard::Get()).or(guard::Head()))
    .default_handler(fn_service(move |req: ServiceRequest| serve_index(req, index.clone())))
}

async fn serve_index(req: ServiceRequest, index: PathBuf) -> Result<ServiceResponse, actix_web::Error> {
  let (req, _) = req.into_parts();
  if !matches!(*req.method(), Method::GET | Method::HEAD) {
    return Ok(ServiceResponse::new(req, not_found().await));
  }
  let file = NamedFile::open_async(index).await?;
  let mut res = file.into_response(&req);
  res
    .headers_mut()
    .insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
  Ok(ServiceResponse::new(req, res))
}

async fn not_found() -> HttpResponse {
  HttpResponse::NotFound().json(serde_json::json!({"msg": "Not found"}))
}
