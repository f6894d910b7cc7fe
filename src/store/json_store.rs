//! File-backed ledger store
//!
//! Persists each collection as one JSON document under a data directory,
//! mirroring the key-value layout of the original storage. Writes replace
//! the whole document via a temp file and rename, so no reader ever observes
//! a partially written snapshot.
//!
//! # First run and migration
//!
//! Loading with no data on disk seeds two demo wallets and an empty
//! transaction list. Stores written by the pre-hashing version of the app
//! kept the unlock PIN in plaintext; initialization rewrites any such record
//! with the proper one-way digest. Both steps run at most once per store
//! instance and are idempotent.
//!
//! # Failure semantics
//!
//! Corrupt JSON on read is treated as "no data": the collection is re-seeded
//! rather than crashing the caller. Write failures surface as
//! `WalletError::Storage`.

use crate::core::pin::{hash_pin, DEMO_PIN};
use crate::store::traits::LedgerStore;
use crate::types::{Transaction, Wallet, WalletError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

const WALLETS_FILE: &str = "wallets.json";
const TRANSACTIONS_FILE: &str = "transactions.json";

/// Ledger store backed by JSON documents on disk
pub struct JsonFileStore {
    dir: PathBuf,
    initialized: AtomicBool,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, WalletError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JsonFileStore {
            dir,
            initialized: AtomicBool::new(false),
        })
    }

    /// Seed missing collections and upgrade legacy PIN records
    ///
    /// Runs at most once per store instance; calling it again is a no-op.
    fn ensure_initialized(&self) -> Result<(), WalletError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        match self.read_json::<Vec<Wallet>>(WALLETS_FILE) {
            Ok(Some(mut wallets)) => {
                if migrate_legacy_pins(&mut wallets) {
                    info!("upgraded legacy plaintext PIN records");
                    self.write_json(WALLETS_FILE, &wallets)?;
                }
            }
            Ok(None) => {
                info!(dir = %self.dir.display(), "seeding demo wallets");
                self.write_json(WALLETS_FILE, &crate::store::demo_wallets())?;
            }
            Err(_) => {
                warn!("wallet snapshot unreadable, re-seeding demo wallets");
                self.write_json(WALLETS_FILE, &crate::store::demo_wallets())?;
            }
        }

        match self.read_json::<Vec<Transaction>>(TRANSACTIONS_FILE) {
            Ok(Some(_)) => {}
            Ok(None) => self.write_json(TRANSACTIONS_FILE, &Vec::<Transaction>::new())?,
            Err(_) => {
                warn!("transaction snapshot unreadable, resetting to empty");
                self.write_json(TRANSACTIONS_FILE, &Vec::<Transaction>::new())?;
            }
        }

        Ok(())
    }

    /// Read and parse one collection document
    ///
    /// Returns `Ok(None)` when the file does not exist yet; parse failures
    /// are returned as errors for the caller to degrade on.
    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, WalletError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&raw)?;
        Ok(Some(value))
    }

    /// Replace one collection document atomically
    ///
    /// Writes to a sibling temp file first, then renames over the target.
    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), WalletError> {
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        debug!(file, "snapshot saved");
        Ok(())
    }

    /// Load one collection, falling back to its seed when unreadable
    fn load_or_seed<T: DeserializeOwned + Serialize>(
        &self,
        file: &str,
        seed: impl FnOnce() -> T,
    ) -> Result<T, WalletError> {
        self.ensure_initialized()?;
        match self.read_json::<T>(file) {
            Ok(Some(value)) => Ok(value),
            // Initialization wrote the file; reaching these arms means it
            // was removed or corrupted afterwards. Degrade to the seed.
            Ok(None) | Err(_) => {
                warn!(file, "snapshot unreadable after initialization, re-seeding");
                let value = seed();
                self.write_json(file, &value)?;
                Ok(value)
            }
        }
    }

    /// Directory this store persists into
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }
}

impl LedgerStore for JsonFileStore {
    fn load_wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        self.load_or_seed(WALLETS_FILE, crate::store::demo_wallets)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>, WalletError> {
        self.load_or_seed(TRANSACTIONS_FILE, Vec::new)
    }

    fn save_wallets(&self, wallets: &[Wallet]) -> Result<(), WalletError> {
        self.ensure_initialized()?;
        self.write_json(WALLETS_FILE, &wallets)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), WalletError> {
        self.ensure_initialized()?;
        self.write_json(TRANSACTIONS_FILE, &transactions)
    }
}

/// Rewrite wallets whose PIN digest field still holds the plaintext sentinel
///
/// Returns whether anything changed. Running this twice on the same set is
/// a no-op the second time: a digest never equals the sentinel.
pub fn migrate_legacy_pins(wallets: &mut [Wallet]) -> bool {
    let mut changed = false;
    for wallet in wallets.iter_mut() {
        if wallet.pin_hash == DEMO_PIN {
            wallet.pin_hash = hash_pin(DEMO_PIN);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo_wallets;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path()).unwrap()
    }

    #[test]
    fn test_first_load_seeds_demo_data() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let wallets = store.load_wallets().unwrap();
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[0].phone_number, "9023456766");
        assert_eq!(wallets[0].balance, Decimal::new(50, 0));
        // Seeded records carry the digest, not the plaintext PIN
        assert_eq!(wallets[0].pin_hash, hash_pin(DEMO_PIN));

        assert!(store.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut wallets = store.load_wallets().unwrap();
        wallets[0].balance = Decimal::new(30, 0);
        store.save_wallets(&wallets).unwrap();

        let reloaded = store.load_wallets().unwrap();
        assert_eq!(reloaded[0].balance, Decimal::new(30, 0));
    }

    #[test]
    fn test_reopened_store_keeps_saved_state() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(&dir);
            let mut wallets = store.load_wallets().unwrap();
            wallets[1].balance = Decimal::new(70, 0);
            store.save_wallets(&wallets).unwrap();
        }

        let store = open_store(&dir);
        let wallets = store.load_wallets().unwrap();
        assert_eq!(wallets[1].balance, Decimal::new(70, 0));
    }

    #[test]
    fn test_corrupt_wallet_snapshot_reseeds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(WALLETS_FILE), "{not json").unwrap();

        let store = open_store(&dir);
        let wallets = store.load_wallets().unwrap();
        assert_eq!(wallets, demo_wallets());
    }

    #[test]
    fn test_legacy_plaintext_pins_are_upgraded_on_open() {
        let dir = TempDir::new().unwrap();
        let mut legacy = demo_wallets();
        for wallet in &mut legacy {
            wallet.pin_hash = DEMO_PIN.to_string();
        }
        fs::write(
            dir.path().join(WALLETS_FILE),
            serde_json::to_string(&legacy).unwrap(),
        )
        .unwrap();

        let store = open_store(&dir);
        let wallets = store.load_wallets().unwrap();
        assert!(wallets.iter().all(|w| w.pin_hash == hash_pin(DEMO_PIN)));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let mut wallets = demo_wallets();
        wallets[0].pin_hash = DEMO_PIN.to_string();

        assert!(migrate_legacy_pins(&mut wallets));
        let after_first = wallets.clone();

        assert!(!migrate_legacy_pins(&mut wallets));
        assert_eq!(wallets, after_first);
    }

    #[test]
    fn test_export_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut wallets = store.load_wallets().unwrap();
        wallets[0].balance = Decimal::new(42, 0);
        store.save_wallets(&wallets).unwrap();

        let snapshot = store.export_all().unwrap();
        assert_eq!(snapshot.wallets, wallets);

        // Wipe and restore
        store.save_wallets(&[]).unwrap();
        store.import_all(snapshot).unwrap();
        assert_eq!(store.load_wallets().unwrap(), wallets);
    }
}
