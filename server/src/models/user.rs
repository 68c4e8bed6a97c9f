// server/src/models/user.rs

use super::crypto::{Crypto, CryptoView};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
  pub id: i32,
  pub email: String,
  pub password_hash: String,
  pub is_active: bool,
}

/// Insert payload. The hash is computed before the store sees it.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
  pub id: i32,
  pub email: String,
  pub is_active: bool,
  pub favorites: Vec<CryptoView>,
}

impl UserView {
  pub fn new(user: &User, favorites: &[Crypto]) -> Self {
    Self {
      id: user.id,
      email: user.email.clone(),
      is_active: user.is_active,
      favorites: favorites.iter().map(CryptoView::from).collect(),
    }
  }
}
