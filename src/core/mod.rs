//! Core business logic module
//!
//! - `engine` - Transfer, top-up, settlement, and PIN verification rules
//! - `ident` - Unique identifier and commitment-hash generation
//! - `pin` - One-way PIN digest handling

pub mod engine;
pub mod ident;
pub mod pin;

pub use engine::WalletEngine;
pub use ident::{commitment_hash, next_id, now_millis};
pub use pin::hash_pin;
