// server/src/store/mod.rs

//! Data-access port. Handlers receive an `Arc<dyn Store>` through
//! `AppState` and never touch a global session.
//!
//! Outcome contract shared by every adapter:
//!  - `insert_user` with a taken email → `AppError::Conflict`.
//!  - `insert_item` with an unknown category → `AppError::NotFound`.
//!  - `insert_crypto` with a taken symbol → `AppError::Conflict`.
//!  - `delete_*` of an unknown id → `AppError::NotFound`.
//!  - `delete_category` while items reference it → `AppError::Conflict`.
//!  - `delete_crypto` drops the favorites pointing at it.
//!  - `add_favorite`: unknown crypto → `NotFound`, existing pair → `Conflict`;
//!    on success the favorited crypto comes back.
//!  - `remove_favorite` of an absent pair → `AppError::Validation`.
//!  - Listings come back in insertion (id) order.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::errors::{AppError, Result};
use crate::models::{Category, Crypto, Item, NewCategory, NewCrypto, NewItem, NewUser, User};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
  /// Cheap connectivity check used by the health endpoint.
  async fn ping(&self) -> Result<()>;

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
  async fn insert_user(&self, new_user: NewUser) -> Result<User>;

  async fn insert_category(&self, new_category: NewCategory) -> Result<Category>;
  async fn list_categories(&self) -> Result<Vec<Category>>;
  async fn delete_category(&self, id: i32) -> Result<()>;

  async fn insert_item(&self, new_item: NewItem) -> Result<Item>;
  async fn list_items(&self) -> Result<Vec<Item>>;
  async fn delete_item(&self, id: i32) -> Result<()>;

  async fn insert_crypto(&self, new_crypto: NewCrypto) -> Result<Crypto>;
  async fn list_cryptos(&self) -> Result<Vec<Crypto>>;
  async fn find_crypto(&self, id: i32) -> Result<Option<Crypto>>;
  async fn delete_crypto(&self, id: i32) -> Result<()>;

  async fn add_favorite(&self, user_id: i32, crypto_id: i32) -> Result<Crypto>;
  async fn remove_favorite(&self, user_id: i32, crypto_id: i32) -> Result<()>;
  async fn list_favorites(&self, user_id: i32) -> Result<Vec<Crypto>>;
}

// Shared outcome constructors so both adapters answer with the same text.

pub(crate) fn user_exists() -> AppError {
  AppError::Conflict("User already exists".to_string())
}

pub(crate) fn category_not_found(id: i32) -> AppError {
  AppError::NotFound(format!("Category {} not found", id))
}

pub(crate) fn category_in_use(id: i32) -> AppError {
  AppError::Conflict(format!("Category {} still has items", id))
}

pub(crate) fn item_not_found(id: i32) -> AppError {
  AppError::NotFound(format!("Item {} not found", id))
}

pub(crate) fn crypto_not_found(id: i32) -> AppError {
  AppError::NotFound(format!("Crypto {} not found", id))
}

pub(crate) fn symbol_taken(symbol: &str) -> AppError {
  AppError::Conflict(format!("Crypto symbol {} already exists", symbol))
}

pub(crate) fn already_favorite() -> AppError {
  AppError::Conflict("Crypto already in favorites".to_string())
}

pub(crate) fn not_a_favorite() -> AppError {
  AppError::Validation("Crypto not in favorites".to_string())
}
