//! The persistence seam of the wallet core
//!
//! `LedgerStore` is injected into the engine instead of being reached through
//! ambient global state, so tests can swap in an in-memory double and the
//! engine never knows where snapshots live.

use crate::types::{Transaction, Wallet, WalletError};
use serde::{Deserialize, Serialize};

/// Both collections together, as used by backup/restore
///
/// Both fields are mandatory: a payload missing either collection fails
/// deserialization and is rejected before any state is touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
}

/// Durable mapping from collection name to its current snapshot
///
/// Semantics are whole-document replace-on-write: there is no field-level
/// merge, and no reader observes a partially written snapshot. Loading when
/// no data exists triggers first-run initialization in the implementation.
pub trait LedgerStore {
    /// Current wallet snapshot, seeding demo data on first run
    fn load_wallets(&self) -> Result<Vec<Wallet>, WalletError>;

    /// Current transaction snapshot in insertion order
    fn load_transactions(&self) -> Result<Vec<Transaction>, WalletError>;

    /// Replace the stored wallet snapshot
    fn save_wallets(&self, wallets: &[Wallet]) -> Result<(), WalletError>;

    /// Replace the stored transaction snapshot
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), WalletError>;

    /// Serialize both collections together for backup
    fn export_all(&self) -> Result<LedgerSnapshot, WalletError> {
        Ok(LedgerSnapshot {
            wallets: self.load_wallets()?,
            transactions: self.load_transactions()?,
        })
    }

    /// Full overwrite of both collections from a restored snapshot
    fn import_all(&self, snapshot: LedgerSnapshot) -> Result<(), WalletError> {
        self.save_wallets(&snapshot.wallets)?;
        self.save_transactions(&snapshot.transactions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_rejects_missing_collection() {
        let missing_transactions = r#"{"wallets": []}"#;
        assert!(serde_json::from_str::<LedgerSnapshot>(missing_transactions).is_err());

        let missing_wallets = r#"{"transactions": []}"#;
        assert!(serde_json::from_str::<LedgerSnapshot>(missing_wallets).is_err());

        let both = r#"{"wallets": [], "transactions": []}"#;
        assert!(serde_json::from_str::<LedgerSnapshot>(both).is_ok());
    }
}
