// server/src/models/item.rs

use serde::Serialize;
use sqlx::FromRow;

/// Item joined with the name of its category.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Item {
  pub id: i32,
  pub name: String,
  pub price: f64,
  pub category_id: i32,
  pub category_name: String,
  pub user_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewItem {
  pub name: String,
  pub price: f64,
  pub category_id: i32,
  pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
  pub id: i32,
  pub name: String,
  pub price: f64,
  /// Category name, not its id.
  pub category: String,
  pub user_id: i32,
}

impl From<&Item> for ItemView {
  fn from(i: &Item) -> Self {
    Self {
      id: i.id,
      name: i.name.clone(),
      price: i.price,
      category: i.category_name.clone(),
      user_id: i.user_id,
    }
  }
}
