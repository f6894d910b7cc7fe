//! Transaction types for the offline wallet core
//!
//! This module defines the transaction record together with its status and
//! kind enums. A logical transfer always produces two mirrored records (a
//! SEND row for the sender's ledger and a RECEIVE row for the receiver's),
//! while a top-up produces a single already-confirmed record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement status of a transaction record
///
/// Records are created PENDING (except top-ups) and transition to CONFIRMED
/// exactly once, during sync. No other mutation is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Recorded locally, not yet reflected in the receiver's balance
    Pending,

    /// Accepted by the simulated settlement authority
    ///
    /// The receiver credit (if applicable) has been applied and a
    /// commitment hash attached.
    Confirmed,
}

/// Role of a transaction record within a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Sender-side debit record of a transfer
    Send,

    /// Receiver-side credit record of a transfer
    ///
    /// The amount is withheld from the receiver's balance until settlement.
    Receive,

    /// External-rail credit with no escrow phase
    TopUp,
}

/// A single ledger row as persisted in the transaction collection
///
/// Created once, mutated only by the PENDING -> CONFIRMED transition, never
/// deleted. For TOPUP records the sender side is a synthetic system/provider
/// identifier, not a real wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, generated at creation, stable thereafter
    pub id: String,

    pub sender_phone: String,
    pub sender_address: String,
    pub receiver_phone: String,
    pub receiver_address: String,

    /// Positive transfer amount
    pub amount: Decimal,

    /// Creation time in Unix milliseconds
    ///
    /// Used for display ordering (descending).
    pub timestamp: i64,

    pub status: TransactionStatus,

    /// Simulated blockchain commitment reference
    ///
    /// 64 lowercase hex characters, present only once CONFIRMED.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Whether this record still awaits settlement
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_kind_serialize_uppercase() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::TopUp).unwrap(),
            "\"TOPUP\""
        );
    }

    #[test]
    fn test_kind_field_serializes_as_type() {
        let tx = Transaction {
            id: "tx_1".to_string(),
            sender_phone: "9023456766".to_string(),
            sender_address: "56766@chain".to_string(),
            receiver_phone: "9098765432".to_string(),
            receiver_address: "65432@chain".to_string(),
            amount: Decimal::new(20, 0),
            timestamp: 1_700_000_000_000,
            status: TransactionStatus::Pending,
            hash: None,
            kind: TransactionKind::Send,
        };

        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":\"SEND\""));
        // No hash key until the record is confirmed
        assert!(!json.contains("\"hash\""));
    }

    #[test]
    fn test_deserializes_stored_layout() {
        let json = r#"{
            "id": "tx_123_recv",
            "senderPhone": "9023456766",
            "senderAddress": "56766@chain",
            "receiverPhone": "9098765432",
            "receiverAddress": "65432@chain",
            "amount": 20,
            "timestamp": 1700000000000,
            "status": "CONFIRMED",
            "hash": "ab",
            "type": "RECEIVE"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Receive);
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert_eq!(tx.hash.as_deref(), Some("ab"));
    }
}
