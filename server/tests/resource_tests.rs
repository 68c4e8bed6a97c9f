// tests/resource_tests.rs
mod common;
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use coinshelf_server::build_app;
use coinshelf_server::store::Store;
use common::*;
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case(Method::GET, "/private")]
#[case(Method::GET, "/me")]
#[case(Method::GET, "/categories")]
#[case(Method::POST, "/categories")]
#[case(Method::DELETE, "/categories/1")]
#[case(Method::GET, "/items")]
#[case(Method::POST, "/items")]
#[case(Method::DELETE, "/items/1")]
#[case(Method::GET, "/cryptos")]
#[case(Method::POST, "/cryptos")]
#[case(Method::DELETE, "/cryptos/1")]
#[case(Method::GET, "/favorites")]
#[case(Method::POST, "/favorites")]
#[case(Method::DELETE, "/favorites/1")]
#[case(Method::GET, "/api/favorites")]
#[actix_web::test]
async fn test_protected_routes_reject_missing_token(#[case] method: Method, #[case] uri: &str) {
  let (state, store) = test_state();
  let app = test::init_service(build_app(state)).await;

  let req = test::TestRequest::default()
    .method(method)
    .uri(uri)
    .set_json(json!({"name": "Sneaky", "user_id": 1, "symbol": "SNK", "crypto_id": 1}))
    .to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert!(body["msg"].is_string());
  assert!(store.list_categories().await.unwrap().is_empty());
  assert!(store.list_cryptos().await.unwrap().is_empty());
}

#[rstest]
#[case("/categories", json!({"name": "Services"}), "Name and user_id are required")]
#[case("/categories", json!({"user_id": 1}), "Name and user_id are required")]
#[case("/categories", json!({"name": "   ", "user_id": 1}), "Name and user_id are required")]
#[case("/items", json!({"price": 2.0, "category_id": 1, "user_id": 1}), "Name, price, category_id, and user_id are required")]
#[case("/items", json!({"name": "Cut", "category_id": 1, "user_id": 1}), "Name, price, category_id, and user_id are required")]
#[case("/items", json!({"name": "Cut", "price": 2.0, "user_id": 1}), "Name, price, category_id, and user_id are required")]
#[case("/items", json!({"name": "Cut", "price": 2.0, "category_id": 1}), "Name, price, category_id, and user_id are required")]
#[case("/cryptos", json!({"name": "Bitcoin"}), "Name and symbol are required")]
#[case("/favorites", json!({}), "crypto_id is required")]
#[case("/categories", json!({"name": "c".repeat(121), "user_id": 1}), "Name must be at most 120 characters")]
#[case("/items", json!({"name": "i".repeat(121), "price": 2.0, "category_id": 1, "user_id": 1}), "Name must be at most 120 characters")]
#[case("/cryptos", json!({"name": "n".repeat(121), "symbol": "NNN"}), "Name must be at most 120 characters")]
#[case("/cryptos", json!({"name": "Toolong", "symbol": "ABCDEFGHIJK"}), "Symbol must be at most 10 characters")]
#[case("/cryptos", json!({"name": "Strasse", "symbol": "ßßßßßß"}), "Symbol must be at most 10 characters")]
#[actix_web::test]
async fn test_missing_fields_are_bad_request_and_persist_nothing(
  #[case] uri: &str,
  #[case] body: Value,
  #[case] expected_msg: &str,
) {
  let (state, store) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;
  // One category exists so item validation is the only thing that can fail.
  let req = test::TestRequest::post()
    .uri("/categories")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Services", "user_id": 1}))
    .to_request();
  assert_eq!(send(&app, req).await.0, StatusCode::CREATED);

  let req = test::TestRequest::post().uri(uri).insert_header(bearer(&token)).set_json(&body).to_request();
  let (status, resp) = send(&app, req).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(resp["msg"], expected_msg);

  assert_eq!(store.list_categories().await.unwrap().len(), 1);
  assert!(store.list_items().await.unwrap().is_empty());
  assert!(store.list_cryptos().await.unwrap().is_empty());
  assert!(store.list_favorites(1).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_values_at_column_width_are_accepted() {
  let (state, store) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let name = "é".repeat(120);
  let req = test::TestRequest::post()
    .uri("/categories")
    .insert_header(bearer(&token))
    .set_json(json!({"name": &name, "user_id": 1}))
    .to_request();
  assert_eq!(send(&app, req).await.0, StatusCode::CREATED);

  let req = test::TestRequest::post()
    .uri("/cryptos")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Strasse", "symbol": "ßßßßß"}))
    .to_request();
  let (status, crypto) = send(&app, req).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(crypto["symbol"], "SSSSSSSSSS");

  assert_eq!(store.list_categories().await.unwrap()[0].name, name);
}

#[actix_web::test]
async fn test_wrongly_typed_field_is_bad_request() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let req = test::TestRequest::post()
    .uri("/categories")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Services", "user_id": "one"}))
    .to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["msg"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_web::test]
async fn test_category_and_item_lifecycle() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let req = test::TestRequest::post()
    .uri("/categories")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Services", "user_id": 1}))
    .to_request();
  let (status, category) = send(&app, req).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(category, json!({"id": 1, "name": "Services", "user_id": 1}));

  let req = test::TestRequest::post()
    .uri("/items")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Haircut", "price": 12.5, "category_id": 1, "user_id": 1}))
    .to_request();
  let (status, item) = send(&app, req).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(
    item,
    json!({"id": 1, "name": "Haircut", "price": 12.5, "category": "Services", "user_id": 1})
  );

  let req = test::TestRequest::get().uri("/items").insert_header(bearer(&token)).to_request();
  let (status, items) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(items, json!([item]));

  let req = test::TestRequest::get().uri("/categories").insert_header(bearer(&token)).to_request();
  let (status, categories) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(categories, json!([category]));

  // Category still referenced by an item.
  let req = test::TestRequest::delete().uri("/categories/1").insert_header(bearer(&token)).to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["msg"], "Category 1 still has items");

  let req = test::TestRequest::delete().uri("/items/1").insert_header(bearer(&token)).to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["msg"], "Item deleted");

  let req = test::TestRequest::delete().uri("/categories/1").insert_header(bearer(&token)).to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["msg"], "Category deleted");
}

#[actix_web::test]
async fn test_item_needs_existing_category() {
  let (state, store) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let req = test::TestRequest::post()
    .uri("/items")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Orphan", "price": 1.0, "category_id": 42, "user_id": 1}))
    .to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["msg"], "Category 42 not found");
  assert!(store.list_items().await.unwrap().is_empty());
}

#[rstest]
#[case("/categories/7")]
#[case("/items/7")]
#[case("/cryptos/7")]
#[actix_web::test]
async fn test_delete_unknown_id_is_not_found_every_time(#[case] uri: &str) {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  for _ in 0..2 {
    let req = test::TestRequest::delete().uri(uri).insert_header(bearer(&token)).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["msg"].as_str().unwrap().ends_with("7 not found"));
  }
}

#[actix_web::test]
async fn test_repeated_delete_after_success_is_not_found() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let req = test::TestRequest::post()
    .uri("/categories")
    .insert_header(bearer(&token))
    .set_json(json!({"name": "Temp", "user_id": 1}))
    .to_request();
  assert_eq!(send(&app, req).await.0, StatusCode::CREATED);

  let delete = || test::TestRequest::delete().uri("/categories/1").insert_header(bearer(&token)).to_request();
  assert_eq!(send(&app, delete()).await.0, StatusCode::OK);
  assert_eq!(send(&app, delete()).await.0, StatusCode::NOT_FOUND);
  assert_eq!(send(&app, delete()).await.0, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_non_numeric_id_is_bad_request() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let req = test::TestRequest::delete().uri("/items/abc").insert_header(bearer(&token)).to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["msg"].as_str().unwrap().starts_with("Invalid id"));
}

#[actix_web::test]
async fn test_crypto_symbols_are_unique() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;
  let token = signed_in(&app).await;

  let create = |symbol: &str| {
    test::TestRequest::post()
      .uri("/cryptos")
      .insert_header(bearer(&token))
      .set_json(json!({"name": "Bitcoin", "symbol": symbol}))
      .to_request()
  };
  let (status, body) = send(&app, create("btc")).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body, json!({"id": 1, "name": "Bitcoin", "symbol": "BTC"}));

  let (status, body) = send(&app, create("BTC")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["msg"], "Crypto symbol BTC already exists");

  let req = test::TestRequest::get().uri("/cryptos").insert_header(bearer(&token)).to_request();
  let (_, list) = send(&app, req).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_api_prefix_serves_the_same_routes() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;

  let req = test::TestRequest::post()
    .uri("/api/register")
    .set_json(json!({"email": EMAIL, "password": PASSWORD}))
    .to_request();
  assert_eq!(send(&app, req).await.0, StatusCode::CREATED);

  let req = test::TestRequest::post()
    .uri("/api/login")
    .set_json(json!({"email": EMAIL, "password": PASSWORD}))
    .to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  let token = body["access_token"].as_str().unwrap();

  let req = test::TestRequest::get().uri("/categories").insert_header(bearer(token)).to_request();
  assert_eq!(send(&app, req).await.0, StatusCode::OK);
}

#[actix_web::test]
async fn test_health_and_unknown_paths() {
  let (state, _) = test_state();
  let app = test::init_service(build_app(state)).await;

  let req = test::TestRequest::get().uri("/health").to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"status": "ok", "database": "ok"}));

  let req = test::TestRequest::get().uri("/does/not/exist").to_request();
  let (status, body) = send(&app, req).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["msg"], "Not found");
}
