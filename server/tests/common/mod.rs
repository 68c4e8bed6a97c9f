// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use coinshelf_server::config::AppConfig;
use coinshelf_server::models::{Crypto, NewCrypto};
use coinshelf_server::state::AppState;
use coinshelf_server::store::{MemoryStore, Store};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub const EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "pw1";

/// App state over a fresh in-memory store. The store is handed back so tests
/// can arrange reference data directly.
pub fn test_state() -> (AppState, Arc<MemoryStore>) {
  test_state_with(&[])
}

/// Same as [`test_state`] with extra configuration variables layered on top.
pub fn test_state_with(extra: &[(&str, &str)]) -> (AppState, Arc<MemoryStore>) {
  setup_tracing();
  let vars: HashMap<String, String> = [("DATABASE_URL", "memory://"), ("JWT_KEY", "integration-secret")]
    .iter()
    .chain(extra.iter())
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
  let config = Arc::new(AppConfig::from_vars(vars).unwrap());
  let store = Arc::new(MemoryStore::new());
  let state = AppState::new(store.clone(), config).unwrap();
  (state, store)
}

pub async fn add_crypto(store: &MemoryStore, name: &str, symbol: &str) -> Crypto {
  store
    .insert_crypto(NewCrypto {
      name: name.to_string(),
      symbol: symbol.to_string(),
    })
    .await
    .unwrap()
}

/// Sends `req` and returns the status and the JSON body (`Null` if empty).
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
  S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
  B: MessageBody,
{
  let res = test::call_service(app, req).await;
  let status = res.status();
  let bytes = test::read_body(res).await;
  let body = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, body)
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

pub async fn register<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
  S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
  B: MessageBody,
{
  let req = test::TestRequest::post()
    .uri("/register")
    .set_json(serde_json::json!({"email": email, "password": password}))
    .to_request();
  send(app, req).await
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
  S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
  B: MessageBody,
{
  let req = test::TestRequest::post()
    .uri("/login")
    .set_json(serde_json::json!({"email": email, "password": password}))
    .to_request();
  send(app, req).await
}

/// Registers the default user and returns a bearer token for it.
pub async fn signed_in<S, B>(app: &S) -> String
where
  S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
  B: MessageBody,
{
  let (status, _) = register(app, EMAIL, PASSWORD).await;
  assert_eq!(status, StatusCode::CREATED);
  let (status, body) = login(app, EMAIL, PASSWORD).await;
  assert_eq!(status, StatusCode::OK);
  body["access_token"].as_str().unwrap().to_string()
}
