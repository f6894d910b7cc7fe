//! Types module
//!
//! Core data types shared across the wallet core:
//! - `wallet` - Wallet record and address derivation
//! - `transaction` - Transaction record, status and kind enums
//! - `error` - The `WalletError` taxonomy

pub mod error;
pub mod transaction;
pub mod wallet;

pub use error::WalletError;
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use wallet::{Wallet, ADDRESS_SUFFIX};
