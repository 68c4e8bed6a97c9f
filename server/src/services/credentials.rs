// server/src/services/credentials.rs

//! Registration, login and identity resolution on top of the `Store` port.

use crate::errors::{AppError, Result};
use crate::models::{NewUser, User, MAX_EMAIL_CHARS};
use crate::store::{user_exists, Store};
use coinshelf_auth::{hash_password, verify_password, TokenKeys};
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn validate_credentials(email: &str, password: &str) -> Result<()> {
  if email.trim().is_empty() || !email.contains('@') {
    return Err(AppError::Validation("Valid email is required".to_string()));
  }
  if email.chars().count() > MAX_EMAIL_CHARS {
    return Err(AppError::Validation(format!(
      "Email must be at most {} characters",
      MAX_EMAIL_CHARS
    )));
  }
  if password.is_empty() {
    return Err(AppError::Validation("Password is required".to_string()));
  }
  Ok(())
}

// Argon2 is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
  F: FnOnce() -> std::result::Result<T, coinshelf_auth::AuthError> + Send + 'static,
  T: Send + 'static,
{
  tokio::task::spawn_blocking(f)
    .await
    .map_err(|e| AppError::Internal(format!("Password task failed: {}", e)))?
    .map_err(AppError::from)
}

/// Creates an active user with a salted hash of `password`.
#[instrument(name = "credentials::register", skip(store, password))]
pub async fn register(store: &dyn Store, email: &str, password: &str) -> Result<User> {
  validate_credentials(email, password)?;

  if store.find_user_by_email(email).await?.is_some() {
    warn!("Attempt to register with existing email.");
    return Err(user_exists());
  }

  let raw = password.to_string();
  let password_hash = run_blocking(move || hash_password(&raw)).await?;

  // The unique index still guards a concurrent registration of the same email.
  let user = store
    .insert_user(NewUser {
      email: email.to_string(),
      password_hash,
    })
    .await?;
  info!(user_id = user.id, "User registered.");
  Ok(user)
}

/// Checks the password and issues a bearer token whose subject is the email.
#[instrument(name = "credentials::authenticate", skip(store, keys, password))]
pub async fn authenticate(store: &dyn Store, keys: &TokenKeys, email: &str, password: &str) -> Result<String> {
  validate_credentials(email, password)?;

  let user = match store.find_user_by_email(email).await? {
    Some(user) if user.is_active => user,
    Some(_) => {
      warn!("Login attempt for inactive user.");
      return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }
    None => {
      warn!("Login attempt for unknown email.");
      return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }
  };

  let stored_hash = user.password_hash.clone();
  let raw = password.to_string();
  if !run_blocking(move || verify_password(&stored_hash, &raw)).await? {
    warn!(user_id = user.id, "Password mismatch.");
    return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
  }

  let token = keys.issue(&user.email)?;
  info!(user_id = user.id, "Login successful.");
  Ok(token)
}

/// Maps a verified token identity back to its user row.
pub async fn resolve_user(store: &dyn Store, email: &str) -> Result<User> {
  match store.find_user_by_email(email).await? {
    Some(user) if user.is_active => Ok(user),
    _ => Err(AppError::Auth("User for this token no longer exists".to_string())),
  }
}
