// auth/src/token.rs

//! HS256 bearer tokens.
//!
//! The subject claim carries the user's email, not the numeric id. Expiry is
//! always enforced and the lifetime is chosen by the caller.

use crate::error::AuthError;
use chrono::{DateTime, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Lifetime used when the deployment does not configure one.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// Identity of the bearer (the user's email).
  pub sub: String,
  /// Issued-at, seconds since the Unix epoch.
  pub iat: i64,
  /// Expiry, seconds since the Unix epoch.
  pub exp: i64,
}

/// Signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct TokenKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  validation: Validation,
  ttl: Duration,
}

impl fmt::Debug for TokenKeys {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenKeys")
      .field("secret", &"[REDACTED]")
      .field("ttl", &self.ttl)
      .finish()
  }
}

impl TokenKeys {
  pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, AuthError> {
    if secret.is_empty() {
      return Err(AuthError::EmptySecret);
    }
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Ok(Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    })
  }

  /// Issues a token for `subject`, valid from now for the configured lifetime.
  pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
    self.issue_at(subject, Utc::now())
  }

  #[instrument(name = "auth::issue_token", skip(self), err(Display))]
  pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
    let iat = issued_at.timestamp();
    let ttl_secs = i64::try_from(self.ttl.as_secs()).map_err(|e| AuthError::TokenIssue(e.to_string()))?;
    let claims = Claims {
      sub: subject.to_string(),
      iat,
      exp: iat.saturating_add(ttl_secs),
    };

    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(|e| AuthError::TokenIssue(e.to_string()))?;
    debug!(exp = claims.exp, "Token issued.");
    Ok(token)
  }

  /// Checks signature and expiry, returning the embedded claims.
  #[instrument(name = "auth::verify_token", skip_all, err(Display))]
  pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
    if token.trim().is_empty() {
      return Err(AuthError::InvalidToken("token is empty".to_string()));
    }
    match jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation) {
      Ok(data) => Ok(data.claims),
      Err(e) => {
        warn!(error = %e, "Token rejected.");
        match e.kind() {
          ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
          _ => Err(AuthError::InvalidToken(e.to_string())),
        }
      }
    }
  }
}
