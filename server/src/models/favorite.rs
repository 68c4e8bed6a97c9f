// server/src/models/favorite.rs

use sqlx::FromRow;

/// One (user, crypto) pair. The pair is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow)]
pub struct Favorite {
  pub user_id: i32,
  pub crypto_id: i32,
}
