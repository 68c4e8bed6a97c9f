// auth/src/error.rs
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
  #[error("Password cannot be empty.")]
  EmptyPassword,

  #[error("Token signing secret cannot be empty.")]
  EmptySecret,

  #[error("Invalid stored password hash: {0}")]
  InvalidHash(String),

  #[error("Password hashing failed: {0}")]
  Hashing(String),

  #[error("Token could not be issued: {0}")]
  TokenIssue(String),

  #[error("Token has expired.")]
  TokenExpired,

  #[error("Invalid token: {0}")]
  InvalidToken(String),
}

impl AuthError {
  /// True when the failure is the caller's fault (bad or stale credential)
  /// rather than a server-side problem.
  pub fn is_credential_rejection(&self) -> bool {
    matches!(
      self,
      AuthError::EmptyPassword | AuthError::TokenExpired | AuthError::InvalidToken(_)
    )
  }
}
