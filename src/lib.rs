//! Offline wallet core
//! # Overview
//!
//! This library simulates offline peer-to-peer money transfer with deferred
//! blockchain settlement: a transfer made without connectivity is applied
//! optimistically on the sender's side, queued as PENDING, and reconciled
//! against the simulated chain during a sync operation.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Wallet, Transaction, WalletError)
//! - [`store`] - Snapshot persistence behind the injected [`store::LedgerStore`] seam
//! - [`core`] - Business logic:
//!   - [`core::engine`] - Transfer, top-up, settlement, and PIN verification
//!   - [`core::ident`] - Unique id and commitment-hash generation
//!   - [`core::pin`] - One-way PIN digest handling
//! - [`backup`] - PIN-encrypted export/restore of both collections
//! - [`cli`] - Argument parsing for the demo binary
//!
//! # Transaction lifecycle
//!
//! A transfer appends two mirrored records:
//!
//! - **SEND**: sender's ledger row; the debit happens at creation
//! - **RECEIVE**: receiver's ledger row; the credit is withheld until sync
//!
//! Both are born PENDING and transition to CONFIRMED together during
//! [`core::WalletEngine::settle`], which attaches a 64-hex commitment hash.
//! A **TOPUP** is born CONFIRMED; money only enters the system through it.

// Module declarations
pub mod backup;
pub mod cli;
pub mod core;
pub mod store;
pub mod types;

pub use core::{hash_pin, WalletEngine};
pub use store::{JsonFileStore, LedgerSnapshot, LedgerStore, MemoryStore};
pub use types::{Transaction, TransactionKind, TransactionStatus, Wallet, WalletError};
