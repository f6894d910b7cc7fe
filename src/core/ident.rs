//! Identifier and commitment-hash generation
//!
//! Every new record gets an id built from a millisecond timestamp, a
//! process-wide sequence counter, and random noise. The counter is what
//! guarantees uniqueness: a transfer creates two records back-to-back, so a
//! bare timestamp collides routinely.

use rand::RngCore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Current Unix time in milliseconds
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Generate an identifier unique within the process lifetime
///
/// Layout: `{prefix}_{millis}_{seq}{noise}` where `seq` is a monotonic
/// counter and `noise` eight random hex characters.
pub fn next_id(prefix: &str) -> String {
    let millis = now_millis();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let noise = rand::random::<u32>();
    format!("{prefix}_{millis}_{seq:x}{noise:08x}")
}

/// Generate a simulated blockchain commitment reference
///
/// 64 lowercase hex characters with no external verification; purely a
/// display artifact denoting "committed".
pub fn commitment_hash() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_in_tight_loop() {
        let ids: HashSet<String> = (0..1000).map(|_| next_id("tx")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_carries_prefix() {
        assert!(next_id("wallet").starts_with("wallet_"));
        assert!(next_id("tx").starts_with("tx_"));
    }

    #[test]
    fn test_commitment_hash_shape() {
        let hash = commitment_hash();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_commitment_hashes_differ() {
        assert_ne!(commitment_hash(), commitment_hash());
    }
}
