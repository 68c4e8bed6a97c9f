// server/src/models/crypto.rs

use serde::Serialize;
use sqlx::FromRow;

/// Reference data; not owned by any user.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Crypto {
  pub id: i32,
  pub name: String,
  pub symbol: String,
}

#[derive(Debug, Clone)]
pub struct NewCrypto {
  pub name: String,
  pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoView {
  pub id: i32,
  pub name: String,
  pub symbol: String,
}

impl From<&Crypto> for CryptoView {
  fn from(c: &Crypto) -> Self {
    Self {
      id: c.id,
      name: c.name.clone(),
      symbol: c.symbol.clone(),
    }
  }
}
