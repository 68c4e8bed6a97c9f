// server/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::store::Store;
use coinshelf_auth::TokenKeys;
use std::sync::Arc;

/// Shared, immutable per-process handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn Store>,
  pub tokens: Arc<TokenKeys>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Result<Self> {
    let tokens = TokenKeys::new(config.jwt_secret.as_bytes(), config.token_ttl)?;
    Ok(Self {
      store,
      tokens: Arc::new(tokens),
      config,
    })
  }
}
