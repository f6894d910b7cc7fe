//! Error types for the offline wallet core
//!
//! All errors here are recoverable at the call site; nothing in the core
//! should terminate the process. Validation errors are raised before any
//! mutation, so a failed operation leaves wallets and transactions exactly
//! as they were.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the wallet core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// Wallet or recipient unresolvable by phone number or address
    #[error("No wallet found for '{key}'")]
    NotFound {
        /// The phone number or address that failed to resolve
        key: String,
    },

    /// Zero or negative amount supplied to a balance-changing operation
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    /// Sender and receiver are the same wallet
    #[error("Cannot transfer to self ({phone})")]
    SelfTransfer { phone: String },

    /// Sender balance cannot cover the requested transfer
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    /// PIN mismatch or unknown phone number
    ///
    /// Deliberately carries no detail: the caller cannot tell a missing
    /// wallet from a wrong PIN, which prevents identity enumeration.
    #[error("Authentication failed")]
    AuthFailure,

    /// A settlement round-trip is already in flight
    ///
    /// A second sync started before the first resolves is rejected rather
    /// than interleaved.
    #[error("A sync is already in progress")]
    SyncInFlight,

    /// Backup blob failed decoding, authentication, or shape validation
    ///
    /// Existing persisted state is left untouched.
    #[error("Corrupt backup: {reason}")]
    CorruptBackup { reason: String },

    /// Read or write failure on the persistence layer
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Checked balance arithmetic overflowed
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: String },
}

impl WalletError {
    /// Create a NotFound error
    pub fn not_found(key: impl Into<String>) -> Self {
        WalletError::NotFound { key: key.into() }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        WalletError::InvalidAmount { amount }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(phone: impl Into<String>) -> Self {
        WalletError::SelfTransfer {
            phone: phone.into(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        WalletError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create a CorruptBackup error
    pub fn corrupt_backup(reason: impl Into<String>) -> Self {
        WalletError::CorruptBackup {
            reason: reason.into(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        WalletError::Storage {
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        WalletError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::Storage {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(error: serde_json::Error) -> Self {
        WalletError::Storage {
            message: error.to_string(),
        }
    }
}
