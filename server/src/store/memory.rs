// server/src/store/memory.rs

//! In-memory adapter with the same outcome contract as [`PgStore`](super::PgStore).
//! Used by the test suite and for running the server without a database.

use super::{
  already_favorite, category_in_use, category_not_found, crypto_not_found, item_not_found, not_a_favorite,
  symbol_taken, user_exists, Store,
};
use crate::errors::Result;
use crate::models::{Category, Crypto, Favorite, Item, NewCategory, NewCrypto, NewItem, NewUser, User};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
struct Tables {
  users: Vec<User>,
  categories: Vec<Category>,
  items: Vec<Item>,
  cryptos: Vec<Crypto>,
  favorites: Vec<Favorite>,
  next_user_id: i32,
  next_category_id: i32,
  next_item_id: i32,
  next_crypto_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
  *counter += 1;
  *counter
}

#[derive(Default)]
pub struct MemoryStore {
  tables: Mutex<Tables>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn user_count(&self) -> usize {
    self.tables.lock().users.len()
  }
}

#[async_trait]
impl Store for MemoryStore {
  async fn ping(&self) -> Result<()> {
    Ok(())
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.tables.lock().users.iter().find(|u| u.email == email).cloned())
  }

  async fn insert_user(&self, new_user: NewUser) -> Result<User> {
    let mut t = self.tables.lock();
    if t.users.iter().any(|u| u.email == new_user.email) {
      return Err(user_exists());
    }
    let user = User {
      id: next_id(&mut t.next_user_id),
      email: new_user.email,
      password_hash: new_user.password_hash,
      is_active: true,
    };
    t.users.push(user.clone());
    Ok(user)
  }

  async fn insert_category(&self, new_category: NewCategory) -> Result<Category> {
    let mut t = self.tables.lock();
    let category = Category {
      id: next_id(&mut t.next_category_id),
      name: new_category.name,
      user_id: new_category.user_id,
    };
    t.categories.push(category.clone());
    Ok(category)
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    Ok(self.tables.lock().categories.clone())
  }

  async fn delete_category(&self, id: i32) -> Result<()> {
    let mut t = self.tables.lock();
    let pos = t.categories.iter().position(|c| c.id == id).ok_or_else(|| category_not_found(id))?;
    if t.items.iter().any(|i| i.category_id == id) {
      return Err(category_in_use(id));
    }
    t.categories.remove(pos);
    Ok(())
  }

  async fn insert_item(&self, new_item: NewItem) -> Result<Item> {
    let mut t = self.tables.lock();
    let category_name = t
      .categories
      .iter()
      .find(|c| c.id == new_item.category_id)
      .map(|c| c.name.clone())
      .ok_or_else(|| category_not_found(new_item.category_id))?;
    let item = Item {
      id: next_id(&mut t.next_item_id),
      name: new_item.name,
      price: new_item.price,
      category_id: new_item.category_id,
      category_name,
      user_id: new_item.user_id,
    };
    t.items.push(item.clone());
    Ok(item)
  }

  async fn list_items(&self) -> Result<Vec<Item>> {
    Ok(self.tables.lock().items.clone())
  }

  async fn delete_item(&self, id: i32) -> Result<()> {
    let mut t = self.tables.lock();
    let pos = t.items.iter().position(|i| i.id == id).ok_or_else(|| item_not_found(id))?;
    t.items.remove(pos);
    Ok(())
  }

  async fn insert_crypto(&self, new_crypto: NewCrypto) -> Result<Crypto> {
    let mut t = self.tables.lock();
    if t.cryptos.iter().any(|c| c.symbol == new_crypto.symbol) {
      return Err(symbol_taken(&new_crypto.symbol));
    }
    let crypto = Crypto {
      id: next_id(&mut t.next_crypto_id),
      name: new_crypto.name,
      symbol: new_crypto.symbol,
    };
    t.cryptos.push(crypto.clone());
    Ok(crypto)
  }

  async fn list_cryptos(&self) -> Result<Vec<Crypto>> {
    Ok(self.tables.lock().cryptos.clone())
  }

  async fn find_crypto(&self, id: i32) -> Result<Option<Crypto>> {
    Ok(self.tables.lock().cryptos.iter().find(|c| c.id == id).cloned())
  }

  async fn delete_crypto(&self, id: i32) -> Result<()> {
    let mut t = self.tables.lock();
    let pos = t.cryptos.iter().position(|c| c.id == id).ok_or_else(|| crypto_not_found(id))?;
    t.cryptos.remove(pos);
    t.favorites.retain(|f| f.crypto_id != id);
    Ok(())
  }

  async fn add_favorite(&self, user_id: i32, crypto_id: i32) -> Result<Crypto> {
    let mut t = self.tables.lock();
    let crypto = t
      .cryptos
      .iter()
      .find(|c| c.id == crypto_id)
      .cloned()
      .ok_or_else(|| crypto_not_found(crypto_id))?;
    let favorite = Favorite { user_id, crypto_id };
    if t.favorites.contains(&favorite) {
      return Err(already_favorite());
    }
    t.favorites.push(favorite);
    Ok(crypto)
  }

  async fn remove_favorite(&self, user_id: i32, crypto_id: i32) -> Result<()> {
    let mut t = self.tables.lock();
    let pos = t
      .favorites
      .iter()
      .position(|f| f.user_id == user_id && f.crypto_id == crypto_id)
      .ok_or_else(not_a_favorite)?;
    t.favorites.remove(pos);
    Ok(())
  }

  async fn list_favorites(&self, user_id: i32) -> Result<Vec<Crypto>> {
    let t = self.tables.lock();
    let cryptos = t
      .favorites
      .iter()
      .filter(|f| f.user_id == user_id)
      .filter_map(|f| t.cryptos.iter().find(|c| c.id == f.crypto_id).cloned())
      .collect();
    Ok(cryptos)
  }
}
