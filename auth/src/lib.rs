// auth/src/lib.rs

//! Credential primitives for the coinshelf backend.
//!
//! This crate knows nothing about HTTP or storage. It offers:
//!  - Argon2 password hashing and verification.
//!  - Signed HS256 bearer tokens whose subject is the user's email.

pub mod error;
pub mod password;
pub mod token;

pub use crate::error::AuthError;
pub use crate::password::{hash_password, verify_password};
pub use crate::token::{Claims, TokenKeys, DEFAULT_TOKEN_TTL};
