// server/src/seed.rs

//! Reference crypto rows inserted at startup when `SEED_DB=true`.

use crate::errors::Result;
use crate::models::NewCrypto;
use crate::store::Store;
use std::collections::HashSet;
use tracing::info;

pub const REFERENCE_CRYPTOS: &[(&str, &str)] = &[
  ("Bitcoin", "BTC"),
  ("Ethereum", "ETH"),
  ("Tether", "USDT"),
  ("BNB", "BNB"),
  ("Solana", "SOL"),
  ("XRP", "XRP"),
  ("Cardano", "ADA"),
  ("Dogecoin", "DOGE"),
];

/// Inserts every reference crypto whose symbol is not present yet.
/// Returns how many rows were added.
pub async fn seed_cryptos(store: &dyn Store) -> Result<usize> {
  let existing: HashSet<String> = store.list_cryptos().await?.into_iter().map(|c| c.symbol).collect();

  let mut added = 0;
  for (name, symbol) in REFERENCE_CRYPTOS {
    if existing.contains(*symbol) {
      continue;
    }
    store
      .insert_crypto(NewCrypto {
        name: name.to_string(),
        symbol: symbol.to_string(),
      })
      .await?;
    added += 1;
  }
  info!(added, "Reference cryptos seeded.");
  Ok(added)
}
