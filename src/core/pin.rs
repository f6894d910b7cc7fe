//! PIN digest handling
//!
//! The unlock PIN is stored as a one-way digest and only ever compared,
//! never reversed.

use sha2::{Digest, Sha256};

/// PIN the demo wallets ship with
///
/// Also the plaintext sentinel the legacy migration looks for: stores
/// written before hashing landed kept this value verbatim in `pinHash`.
pub const DEMO_PIN: &str = "1234";

/// Compute the lowercase hex SHA-256 digest of a PIN
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}
