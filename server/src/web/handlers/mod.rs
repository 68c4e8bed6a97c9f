// server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod category_handlers;
pub mod crypto_handlers;
pub mod favorite_handlers;
pub mod health_handlers;
pub mod item_handlers;

use crate::errors::{AppError, Result};

/// Treats blank strings the same as absent ones.
pub(crate) fn present(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Rejects values wider than their column before they reach the store.
pub(crate) fn check_width(field: &str, value: &str, max_chars: usize) -> Result<()> {
  if value.chars().count() > max_chars {
    return Err(AppError::Validation(format!("{} must be at most {} characters", field, max_chars)));
  }
  Ok(())
}
