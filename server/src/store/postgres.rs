// server/src/store/postgres.rs

//! PostgreSQL adapter. Every mutation runs inside its own transaction: the
//! transaction is committed only on the success path and rolled back when
//! dropped on any early return.

use super::{
  already_favorite, category_in_use, category_not_found, crypto_not_found, item_not_found, not_a_favorite,
  symbol_taken, user_exists, Store,
};
use crate::errors::{AppError, Result};
use crate::models::{Category, Crypto, Item, NewCategory, NewCrypto, NewItem, NewUser, User};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    Ok(Self { pool })
  }

  /// Applies the embedded migrations under `server/migrations`.
  pub async fn migrate(&self) -> Result<()> {
    sqlx::migrate!("./migrations")
      .run(&self.pool)
      .await
      .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl Store for PgStore {
  async fn ping(&self) -> Result<()> {
    sqlx::query("SELECT 1").execute(&self.pool).await?;
    Ok(())
  }

  #[instrument(name = "store::find_user_by_email", skip(self))]
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash, is_active FROM users WHERE email = $1")
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  #[instrument(name = "store::insert_user", skip(self, new_user), fields(email = %new_user.email))]
  async fn insert_user(&self, new_user: NewUser) -> Result<User> {
    let mut tx = self.pool.begin().await?;
    let user = sqlx::query_as::<_, User>(
      "INSERT INTO users (email, password_hash, is_active) VALUES ($1, $2, TRUE) \
       RETURNING id, email, password_hash, is_active",
    )
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| if is_unique_violation(&e) { user_exists() } else { AppError::Store(e) })?;
    tx.commit().await?;
    debug!(user_id = user.id, "User row inserted.");
    Ok(user)
  }

  #[instrument(name = "store::insert_category", skip(self))]
  async fn insert_category(&self, new_category: NewCategory) -> Result<Category> {
    let mut tx = self.pool.begin().await?;
    let category = sqlx::query_as::<_, Category>(
      "INSERT INTO categories (name, user_id) VALUES ($1, $2) RETURNING id, name, user_id",
    )
    .bind(&new_category.name)
    .bind(new_category.user_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(category)
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name, user_id FROM categories ORDER BY id")
      .fetch_all(&self.pool)
      .await?;
    Ok(categories)
  }

  #[instrument(name = "store::delete_category", skip(self))]
  async fn delete_category(&self, id: i32) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(|e| if is_foreign_key_violation(&e) { category_in_use(id) } else { AppError::Store(e) })?;
    if result.rows_affected() == 0 {
      return Err(category_not_found(id));
    }
    tx.commit().await?;
    Ok(())
  }

  #[instrument(name = "store::insert_item", skip(self))]
  async fn insert_item(&self, new_item: NewItem) -> Result<Item> {
    let mut tx = self.pool.begin().await?;
    // Lock the category row so it cannot vanish between the check and the insert.
    let category_name: Option<String> = sqlx::query_scalar("SELECT name FROM categories WHERE id = $1 FOR KEY SHARE")
      .bind(new_item.category_id)
      .fetch_optional(&mut *tx)
      .await?;
    let category_name = category_name.ok_or_else(|| category_not_found(new_item.category_id))?;

    let id: i32 = sqlx::query_scalar(
      "INSERT INTO items (name, price, category_id, user_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&new_item.name)
    .bind(new_item.price)
    .bind(new_item.category_id)
    .bind(new_item.user_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
      if is_foreign_key_violation(&e) {
        category_not_found(new_item.category_id)
      } else {
        AppError::Store(e)
      }
    })?;
    tx.commit().await?;

    Ok(Item {
      id,
      name: new_item.name,
      price: new_item.price,
      category_id: new_item.category_id,
      category_name,
      user_id: new_item.user_id,
    })
  }

  async fn list_items(&self) -> Result<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
      "SELECT i.id, i.name, i.price, i.category_id, c.name AS category_name, i.user_id \
       FROM items i JOIN categories c ON c.id = i.category_id ORDER BY i.id",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }

  #[instrument(name = "store::delete_item", skip(self))]
  async fn delete_item(&self, id: i32) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    let result = sqlx::query("DELETE FROM items WHERE id = $1").bind(id).execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
      return Err(item_not_found(id));
    }
    tx.commit().await?;
    Ok(())
  }

  #[instrument(name = "store::insert_crypto", skip(self))]
  async fn insert_crypto(&self, new_crypto: NewCrypto) -> Result<Crypto> {
    let mut tx = self.pool.begin().await?;
    let crypto =
      sqlx::query_as::<_, Crypto>("INSERT INTO cryptos (name, symbol) VALUES ($1, $2) RETURNING id, name, symbol")
        .bind(&new_crypto.name)
        .bind(&new_crypto.symbol)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
          if is_unique_violation(&e) {
            symbol_taken(&new_crypto.symbol)
          } else {
            AppError::Store(e)
          }
        })?;
    tx.commit().await?;
    Ok(crypto)
  }

  async fn list_cryptos(&self) -> Result<Vec<Crypto>> {
    let cryptos = sqlx::query_as::<_, Crypto>("SELECT id, name, symbol FROM cryptos ORDER BY id")
      .fetch_all(&self.pool)
      .await?;
    Ok(cryptos)
  }

  async fn find_crypto(&self, id: i32) -> Result<Option<Crypto>> {
    let crypto = sqlx::query_as::<_, Crypto>("SELECT id, name, symbol FROM cryptos WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(crypto)
  }

  #[instrument(name = "store::delete_crypto", skip(self))]
  async fn delete_crypto(&self, id: i32) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    // user_favorites rows go with it (ON DELETE CASCADE).
    let result = sqlx::query("DELETE FROM cryptos WHERE id = $1").bind(id).execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
      return Err(crypto_not_found(id));
    }
    tx.commit().await?;
    Ok(())
  }

  #[instrument(name = "store::add_favorite", skip(self))]
  async fn add_favorite(&self, user_id: i32, crypto_id: i32) -> Result<Crypto> {
    let mut tx = self.pool.begin().await?;
    // Held until commit, so the crypto handed back is the one the favorite points at.
    let crypto = sqlx::query_as::<_, Crypto>("SELECT id, name, symbol FROM cryptos WHERE id = $1 FOR KEY SHARE")
      .bind(crypto_id)
      .fetch_optional(&mut *tx)
      .await?
      .ok_or_else(|| crypto_not_found(crypto_id))?;

    // The unique index decides races between concurrent duplicate requests.
    let inserted: Option<i32> = sqlx::query_scalar(
      "INSERT INTO user_favorites (user_id, crypto_id) VALUES ($1, $2) \
       ON CONFLICT (user_id, crypto_id) DO NOTHING RETURNING id",
    )
    .bind(user_id)
    .bind(crypto_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
      if is_foreign_key_violation(&e) {
        crypto_not_found(crypto_id)
      } else {
        error!(error = %e, "Favorite insert failed.");
        AppError::Store(e)
      }
    })?;

    if inserted.is_none() {
      return Err(already_favorite());
    }
    tx.commit().await?;
    Ok(crypto)
  }

  #[instrument(name = "store::remove_favorite", skip(self))]
  async fn remove_favorite(&self, user_id: i32, crypto_id: i32) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    let result = sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND crypto_id = $2")
      .bind(user_id)
      .bind(crypto_id)
      .execute(&mut *tx)
      .await?;
    if result.rows_affected() == 0 {
      return Err(not_a_favorite());
    }
    tx.commit().await?;
    Ok(())
  }

  async fn list_favorites(&self, user_id: i32) -> Result<Vec<Crypto>> {
    let cryptos = sqlx::query_as::<_, Crypto>(
      "SELECT c.id, c.name, c.symbol FROM cryptos c \
       JOIN user_favorites f ON f.crypto_id = c.id \
       WHERE f.user_id = $1 ORDER BY f.id",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(cryptos)
  }
}
