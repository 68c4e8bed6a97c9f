// server/src/models/mod.rs

//! Row types for the relational store and the fixed-shape views sent to
//! clients. Each view is built by a pure `From<&Row>` conversion.

pub mod category;
pub mod crypto;
pub mod favorite;
pub mod item;
pub mod user;

pub use category::{Category, CategoryView, NewCategory};
pub use crypto::{Crypto, CryptoView, NewCrypto};
pub use favorite::Favorite;
pub use item::{Item, ItemView, NewItem};
pub use user::{NewUser, User, UserView};

/// Column widths in `migrations/`, counted in characters as Postgres does.
pub const MAX_EMAIL_CHARS: usize = 120;
pub const MAX_NAME_CHARS: usize = 120;
pub const MAX_SYMBOL_CHARS: usize = 10;
