//! Offline transaction engine
//!
//! This module provides the WalletEngine that enforces the rules by which
//! wallet balances and transaction records change: offline transfer
//! creation, optimistic balance adjustment, deferred crediting, and batch
//! settlement ("sync").
//!
//! The engine enforces:
//! - Validation before mutation (a failed operation has no side effects)
//! - The PENDING escrow window (sender debited now, receiver credited at sync)
//! - Exclusive settlement (a second sync while one is in flight is rejected)

use crate::core::ident::{commitment_hash, next_id, now_millis};
use crate::core::pin::hash_pin;
use crate::store::LedgerStore;
use crate::types::{Transaction, TransactionKind, TransactionStatus, Wallet, WalletError};
use rust_decimal::Decimal;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// Synthetic sender phone for top-up records
pub const TOPUP_SENDER: &str = "SYSTEM";

/// Reference settlement latency
///
/// The in-flight window is deliberately non-instantaneous so callers can
/// exercise the PENDING state meaningfully.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Offline wallet transaction engine
///
/// Holds an injected [`LedgerStore`] and performs read-modify-write cycles
/// against whole snapshots. All operations are atomic from the caller's
/// point of view; settlement additionally simulates a network round-trip.
pub struct WalletEngine<S: LedgerStore> {
    store: S,
    /// Serializes read-modify-write sections across threads
    write_lock: Mutex<()>,
    /// Held for the whole settlement round-trip
    sync_lock: tokio::sync::Mutex<()>,
    settle_delay: Duration,
}

impl<S: LedgerStore> WalletEngine<S> {
    /// Create an engine with the reference ~2 second settlement latency
    pub fn new(store: S) -> Self {
        Self::with_settle_delay(store, DEFAULT_SETTLE_DELAY)
    }

    /// Create an engine with a custom settlement latency
    ///
    /// Mainly for tests; the latency must stay observable to the UI, so
    /// production callers keep the default.
    pub fn with_settle_delay(store: S, settle_delay: Duration) -> Self {
        WalletEngine {
            store,
            write_lock: Mutex::new(()),
            sync_lock: tokio::sync::Mutex::new(()),
            settle_delay,
        }
    }

    /// Access the underlying store (backup/restore goes through this)
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current wallet snapshot
    pub fn wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        self.store.load_wallets()
    }

    /// Current transaction snapshot in insertion order
    ///
    /// Callers needing chronological display sort by timestamp descending.
    pub fn transactions(&self) -> Result<Vec<Transaction>, WalletError> {
        self.store.load_transactions()
    }

    /// Resolve a wallet by phone number or address
    ///
    /// This is the recipient-resolution helper for QR/manual entry; the
    /// mutating operations below take already-resolved phone numbers.
    pub fn find_wallet(&self, key: &str) -> Result<Wallet, WalletError> {
        self.store
            .load_wallets()?
            .into_iter()
            .find(|w| w.phone_number == key || w.address == key)
            .ok_or_else(|| WalletError::not_found(key))
    }

    /// Create an offline transfer
    ///
    /// Debits the sender immediately (optimistic execution, no rollback
    /// path) and appends a PENDING SEND/RECEIVE record pair. The receiver's
    /// balance is untouched until [`settle`](Self::settle).
    ///
    /// # Errors
    ///
    /// All checks run before any mutation:
    /// - `InvalidAmount` if `amount <= 0`
    /// - `SelfTransfer` if sender and receiver match
    /// - `NotFound` if either wallet is unresolvable
    /// - `InsufficientFunds` if the sender cannot cover the amount
    pub fn create_transfer(
        &self,
        sender_phone: &str,
        receiver_phone: &str,
        amount: Decimal,
        timestamp: i64,
    ) -> Result<(), WalletError> {
        let _guard = self.lock_writes()?;

        if amount <= Decimal::ZERO {
            return Err(WalletError::invalid_amount(amount));
        }
        if sender_phone == receiver_phone {
            return Err(WalletError::self_transfer(sender_phone));
        }

        let mut wallets = self.store.load_wallets()?;
        let mut transactions = self.store.load_transactions()?;

        let receiver_address = wallets
            .iter()
            .find(|w| w.phone_number == receiver_phone)
            .map(|w| w.address.clone())
            .ok_or_else(|| WalletError::not_found(receiver_phone))?;

        let sender = wallets
            .iter_mut()
            .find(|w| w.phone_number == sender_phone)
            .ok_or_else(|| WalletError::not_found(sender_phone))?;

        if sender.balance < amount {
            return Err(WalletError::insufficient_funds(sender.balance, amount));
        }

        let sender_address = sender.address.clone();
        sender.balance = sender
            .balance
            .checked_sub(amount)
            .ok_or_else(|| WalletError::arithmetic_overflow("transfer debit"))?;

        // Mirrored record pair: the sender's ledger row and the receiver's.
        // Distinct ids, shared parties/amount/timestamp.
        let send_record = Transaction {
            id: next_id("tx"),
            sender_phone: sender_phone.to_string(),
            sender_address: sender_address.clone(),
            receiver_phone: receiver_phone.to_string(),
            receiver_address: receiver_address.clone(),
            amount,
            timestamp,
            status: TransactionStatus::Pending,
            hash: None,
            kind: TransactionKind::Send,
        };
        let receive_record = Transaction {
            id: next_id("tx"),
            sender_phone: sender_phone.to_string(),
            sender_address,
            receiver_phone: receiver_phone.to_string(),
            receiver_address,
            amount,
            timestamp,
            status: TransactionStatus::Pending,
            hash: None,
            kind: TransactionKind::Receive,
        };
        transactions.push(send_record);
        transactions.push(receive_record);

        self.store.save_wallets(&wallets)?;
        self.store.save_transactions(&transactions)?;

        info!(%amount, sender = sender_phone, receiver = receiver_phone, "transfer queued");
        Ok(())
    }

    /// Credit a wallet from an external payment rail
    ///
    /// Top-ups are treated as already settled: the balance changes
    /// immediately and the single TOPUP record is born CONFIRMED with a
    /// fresh commitment hash. No PENDING phase.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `NotFound` if no wallet matches `phone_number`
    pub fn top_up(
        &self,
        phone_number: &str,
        amount: Decimal,
        source: &str,
    ) -> Result<Transaction, WalletError> {
        let _guard = self.lock_writes()?;

        if amount <= Decimal::ZERO {
            return Err(WalletError::invalid_amount(amount));
        }

        let mut wallets = self.store.load_wallets()?;
        let mut transactions = self.store.load_transactions()?;

        let wallet = wallets
            .iter_mut()
            .find(|w| w.phone_number == phone_number)
            .ok_or_else(|| WalletError::not_found(phone_number))?;

        wallet.balance = wallet
            .balance
            .checked_add(amount)
            .ok_or_else(|| WalletError::arithmetic_overflow("top-up credit"))?;

        let record = Transaction {
            id: next_id("tx"),
            sender_phone: TOPUP_SENDER.to_string(),
            sender_address: source.to_string(),
            receiver_phone: wallet.phone_number.clone(),
            receiver_address: wallet.address.clone(),
            amount,
            timestamp: now_millis(),
            status: TransactionStatus::Confirmed,
            hash: Some(commitment_hash()),
            kind: TransactionKind::TopUp,
        };
        transactions.push(record.clone());

        self.store.save_wallets(&wallets)?;
        self.store.save_transactions(&transactions)?;

        info!(%amount, phone = phone_number, source, "top-up applied");
        Ok(record)
    }

    /// Settle all pending transactions against the simulated chain
    ///
    /// Models a network round-trip to a validating authority: sleeps the
    /// configured latency, then in a single logical commit confirms every
    /// PENDING record (attaching a fresh hash) and applies the deferred
    /// receiver credit of each RECEIVE record. SEND records transition
    /// status only; their debit happened at creation.
    ///
    /// Snapshots are persisted once, after all records are processed, so a
    /// completed call can never leave some pending records confirmed and
    /// others not.
    ///
    /// # Errors
    ///
    /// - `SyncInFlight` if another settlement has not resolved yet
    ///
    /// # Returns
    ///
    /// The count of records transitioned; zero pending means 0 and no
    /// balance changes.
    pub async fn settle(&self) -> Result<usize, WalletError> {
        let _sync = self
            .sync_lock
            .try_lock()
            .map_err(|_| WalletError::SyncInFlight)?;

        debug!(delay_ms = self.settle_delay.as_millis() as u64, "sync started");
        tokio::time::sleep(self.settle_delay).await;

        let _guard = self.lock_writes()?;
        let mut wallets = self.store.load_wallets()?;
        let mut transactions = self.store.load_transactions()?;

        let mut confirmed = 0usize;
        for tx in transactions.iter_mut().filter(|tx| tx.is_pending()) {
            if tx.kind == TransactionKind::Receive {
                // The escrowed value re-enters circulation here. A receiver
                // that is not a local wallet (restored backup, remote peer)
                // still gets its record confirmed.
                if let Some(receiver) = wallets
                    .iter_mut()
                    .find(|w| w.phone_number == tx.receiver_phone)
                {
                    receiver.balance = receiver
                        .balance
                        .checked_add(tx.amount)
                        .ok_or_else(|| WalletError::arithmetic_overflow("settle credit"))?;
                }
            }
            tx.status = TransactionStatus::Confirmed;
            tx.hash = Some(commitment_hash());
            confirmed += 1;
        }

        if confirmed > 0 {
            self.store.save_wallets(&wallets)?;
            self.store.save_transactions(&transactions)?;
        }

        info!(confirmed, "sync finished");
        Ok(confirmed)
    }

    /// Verify a wallet PIN
    ///
    /// Resolves the candidate wallet by phone number, digests the supplied
    /// PIN, and compares. Unknown phone and wrong PIN collapse into the
    /// same `AuthFailure` so callers cannot enumerate identities.
    pub fn verify_pin(&self, phone_number: &str, pin: &str) -> Result<Wallet, WalletError> {
        let wallets = self.store.load_wallets()?;
        match wallets.into_iter().find(|w| w.phone_number == phone_number) {
            Some(wallet) if wallet.pin_hash == hash_pin(pin) => Ok(wallet),
            _ => Err(WalletError::AuthFailure),
        }
    }

    fn lock_writes(&self) -> Result<std::sync::MutexGuard<'_, ()>, WalletError> {
        self.write_lock
            .lock()
            .map_err(|_| WalletError::storage("engine write lock poisoned"))
    }
}
