//! Wallet types for the offline wallet core
//!
//! This module defines the Wallet record and the address derivation helper
//! used for QR/manual-entry recipient lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Suffix appended to the short phone fragment to form a wallet address.
pub const ADDRESS_SUFFIX: &str = "@chain";

/// A single wallet as persisted in the ledger store
///
/// Wallets are created once (seed/demo provisioning) and mutated in place by
/// balance-changing operations; they are never deleted. Field names serialize
/// in camelCase so snapshots and backups stay compatible with the stored
/// JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Opaque stable identifier, assigned at creation, immutable
    pub id: String,

    /// 10-digit phone number, unique across wallets
    ///
    /// Primary lookup key for transfers.
    pub phone_number: String,

    /// Derived display identifier, unique
    ///
    /// Last 5 digits of the phone number plus a fixed suffix. Used for
    /// QR and manual-entry recipient lookup.
    pub address: String,

    /// Current spendable balance
    ///
    /// Non-negative under normal operation. During the PENDING window of a
    /// transfer the debited amount is out of circulation entirely (escrow),
    /// so the sum of balances can be below the confirmed top-up total.
    pub balance: Decimal,

    /// Lowercase hex SHA-256 digest of the unlock PIN
    ///
    /// Compared, never reversed.
    pub pin_hash: String,

    /// Display label
    pub name: String,
}

impl Wallet {
    /// Derive the display address for a phone number
    ///
    /// Takes the last 5 digits of the phone number and appends the fixed
    /// suffix. Phone numbers shorter than 5 digits are used whole.
    pub fn derive_address(phone_number: &str) -> String {
        let tail_start = phone_number.len().saturating_sub(5);
        format!("{}{}", &phone_number[tail_start..], ADDRESS_SUFFIX)
    }
}
