// server/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::{
  auth_handlers, category_handlers, crypto_handlers, favorite_handlers, health_handlers, item_handlers,
};

/// Mounts every API route at the root and again under `/api`, the prefix
/// the bundled front-end calls.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(web::scope("/api").configure(api_routes));
  api_routes(cfg);
}

fn api_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_handlers::health_check_handler))
    // Authentication Routes
    .route("/register", web::post().to(auth_handlers::register_handler))
    .route("/login", web::post().to(auth_handlers::login_handler))
    .route("/private", web::get().to(auth_handlers::private_handler))
    .route("/me", web::get().to(auth_handlers::me_handler))
    // Resource Routes
    .service(
      web::resource("/categories")
        .route(web::get().to(category_handlers::list_categories_handler))
        .route(web::post().to(category_handlers::create_category_handler)),
    )
    .route(
      "/categories/{category_id}",
      web::delete().to(category_handlers::delete_category_handler),
    )
    .service(
      web::resource("/items")
        .route(web::get().to(item_handlers::list_items_handler))
        .route(web::post().to(item_handlers::create_item_handler)),
    )
    .route("/items/{item_id}", web::delete().to(item_handlers::delete_item_handler))
    .service(
      web::resource("/cryptos")
        .route(web::get().to(crypto_handlers::list_cryptos_handler))
        .route(web::post().to(crypto_handlers::create_crypto_handler)),
    )
    .route("/cryptos/{crypto_id}", web::delete().to(crypto_handlers::delete_crypto_handler))
    .service(
      web::resource("/favorites")
        .route(web::get().to(favorite_handlers::list_favorites_handler))
        .route(web::post().to(favorite_handlers::add_favorite_handler)),
    )
    .route(
      "/favorites/{crypto_id}",
      web::delete().to(favorite_handlers::remove_favorite_handler),
    );
}

/// Malformed or missing JSON bodies answer with the usual `{"msg": ...}` shape.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .error_handler(|err, _req| AppError::Validation(format!("Invalid JSON body: {}", err)).into())
}

pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err, _req| AppError::Validation(format!("Invalid id: {}", err)).into())
}
