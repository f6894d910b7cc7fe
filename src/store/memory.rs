//! In-memory ledger store
//!
//! Test double for the `LedgerStore` seam. Holds both collections behind a
//! mutex so the engine can be exercised without touching the filesystem.

use crate::store::traits::{LedgerSnapshot, LedgerStore};
use crate::types::{Transaction, Wallet, WalletError};
use std::sync::Mutex;

/// Snapshot store living entirely in memory
pub struct MemoryStore {
    inner: Mutex<LedgerSnapshot>,
}

impl MemoryStore {
    /// Create an empty store (no wallets, no transactions)
    pub fn new() -> Self {
        MemoryStore {
            inner: Mutex::new(LedgerSnapshot {
                wallets: Vec::new(),
                transactions: Vec::new(),
            }),
        }
    }

    /// Create a store pre-seeded with the demo wallets
    pub fn seeded() -> Self {
        let store = MemoryStore::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.wallets = crate::store::demo_wallets();
        }
        store
    }

    fn with_inner<T>(
        &self,
        f: impl FnOnce(&mut LedgerSnapshot) -> T,
    ) -> Result<T, WalletError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| WalletError::storage("memory store lock poisoned"))?;
        Ok(f(&mut inner))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    fn load_wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        self.with_inner(|inner| inner.wallets.clone())
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>, WalletError> {
        self.with_inner(|inner| inner.transactions.clone())
    }

    fn save_wallets(&self, wallets: &[Wallet]) -> Result<(), WalletError> {
        self.with_inner(|inner| inner.wallets = wallets.to_vec())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), WalletError> {
        self.with_inner(|inner| inner.transactions = transactions.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load_wallets().unwrap().is_empty());
        assert!(store.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_store_has_demo_wallets() {
        let store = MemoryStore::seeded();
        let wallets = store.load_wallets().unwrap();
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[1].phone_number, "9098765432");
    }

    #[test]
    fn test_save_replaces_whole_snapshot() {
        let store = MemoryStore::seeded();
        store.save_wallets(&[]).unwrap();
        assert!(store.load_wallets().unwrap().is_empty());
    }
}
