// server/src/models/category.rs

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
  pub id: i32,
  pub name: String,
  /// Stored as given by the client; not checked against the caller.
  pub user_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
  pub name: String,
  pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
  pub id: i32,
  pub name: String,
  pub user_id: i32,
}

impl From<&Category> for CategoryView {
  fn from(c: &Category) -> Self {
    Self {
      id: c.id,
      name: c.name.clone(),
      user_id: c.user_id,
    }
  }
}
