// server/src/config.rs

use crate::errors::{AppError, Result};
use coinshelf_auth::DEFAULT_TOKEN_TTL;
use dotenvy::dotenv;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,
  pub jwt_secret: String,
  pub token_ttl: Duration,
  /// Front-end bundle served for unmatched paths, if any.
  pub static_dir: Option<PathBuf>,
  pub seed_db: bool,
}

impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("database_max_connections", &self.database_max_connections)
      .field("jwt_secret", &"[REDACTED]")
      .field("token_ttl", &self.token_ttl)
      .field("static_dir", &self.static_dir)
      .field("seed_db", &self.seed_db)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_vars(std::env::vars().collect())
  }

  /// Builds the config from an explicit variable map.
  pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      vars
        .get(var_name)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "3001".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = normalize_database_url(&get_env("DATABASE_URL")?);
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
    let jwt_secret = get_env("JWT_KEY")?;
    let token_ttl = match get_env("JWT_TTL_SECONDS") {
      Ok(raw) => {
        let secs = raw
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid JWT_TTL_SECONDS: {}", e)))?;
        if secs == 0 {
          return Err(AppError::Config("JWT_TTL_SECONDS must be positive".to_string()));
        }
        Duration::from_secs(secs)
      }
      Err(_) => DEFAULT_TOKEN_TTL,
    };
    let static_dir = get_env("STATIC_DIR").ok().map(PathBuf::from);
    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      jwt_secret,
      token_ttl,
      static_dir,
      seed_db,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

// Heroku-style URLs use the `postgres://` scheme; both are accepted by sqlx,
// but keep one canonical spelling in logs and pool options.
fn normalize_database_url(raw: &str) -> String {
  match raw.strip_prefix("postgres://") {
    Some(rest) => format!("postgresql://{}", rest),
    None => raw.to_string(),
  }
}
