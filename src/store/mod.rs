//! Ledger store module
//!
//! Durable key-value persistence of the two wallet collections:
//! - `traits` - The `LedgerStore` seam and the combined `LedgerSnapshot`
//! - `json_store` - File-backed implementation with first-run seeding and
//!   the legacy PIN migration
//! - `memory` - In-memory double for tests

pub mod json_store;
pub mod memory;
pub mod traits;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{LedgerSnapshot, LedgerStore};

use crate::core::pin::{hash_pin, DEMO_PIN};
use crate::types::Wallet;
use rust_decimal::Decimal;

/// Demo wallets seeded on first run
///
/// Two pre-funded wallets unlocked by the demo PIN, matching the values the
/// in-app instructions advertise.
pub fn demo_wallets() -> Vec<Wallet> {
    let starting_balance = Decimal::new(50, 0);
    vec![
        Wallet {
            id: "wallet_a".to_string(),
            name: "Demo User A".to_string(),
            phone_number: "9023456766".to_string(),
            address: Wallet::derive_address("9023456766"),
            balance: starting_balance,
            pin_hash: hash_pin(DEMO_PIN),
        },
        Wallet {
            id: "wallet_b".to_string(),
            name: "Demo User B".to_string(),
            phone_number: "9098765432".to_string(),
            address: Wallet::derive_address("9098765432"),
            balance: starting_balance,
            pin_hash: hash_pin(DEMO_PIN),
        },
    ]
}
