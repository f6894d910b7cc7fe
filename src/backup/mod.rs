//! Encrypted backup and restore
//!
//! A backup is a single opaque base64 blob laid out as
//! `salt(16) || nonce(12) || ciphertext`, where the ciphertext is the
//! JSON-serialized ledger snapshot sealed with AES-256-GCM. The key is
//! derived from the user's PIN with PBKDF2-HMAC-SHA256, salted per backup.
//!
//! Restore reverses the process and rejects anything that fails decoding,
//! authentication, or shape validation without touching existing state.

use crate::store::{LedgerSnapshot, LedgerStore};
use crate::types::WalletError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use sha2::Sha256;
use tracing::{info, warn};

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
/// GCM authentication tag length; ciphertext is never shorter than this
const TAG_LEN: usize = 16;
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive the 256-bit sealing key from a PIN and per-backup salt
fn derive_key(pin: &str, salt: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Export both collections as an encrypted base64 blob
pub fn create_backup<S: LedgerStore>(store: &S, pin: &str) -> Result<String, WalletError> {
    let snapshot = store.export_all()?;
    let json = serde_json::to_vec(&snapshot)?;

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let key = derive_key(pin, &salt);
    let cipher = Aes256Gcm::new(&key.into());
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), json.as_slice())
        .map_err(|_| WalletError::storage("backup encryption failed"))?;

    let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    info!(
        wallets = snapshot.wallets.len(),
        transactions = snapshot.transactions.len(),
        "backup created"
    );
    Ok(BASE64.encode(blob))
}

/// Restore both collections from an encrypted backup blob
///
/// Any failure leaves the store untouched; only a fully decrypted and
/// shape-validated snapshot is imported (full overwrite of both
/// collections).
pub fn restore_backup<S: LedgerStore>(
    store: &S,
    blob: &str,
    pin: &str,
) -> Result<(), WalletError> {
    let raw = BASE64
        .decode(blob.trim())
        .map_err(|e| WalletError::corrupt_backup(format!("invalid base64: {e}")))?;

    if raw.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(WalletError::corrupt_backup("blob too short"));
    }
    let (salt, rest) = raw.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_key(pin, salt);
    let cipher = Aes256Gcm::new(&key.into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            warn!("backup authentication failed");
            WalletError::corrupt_backup("authentication failed (wrong PIN or tampered blob)")
        })?;

    let snapshot: LedgerSnapshot = serde_json::from_slice(&plaintext)
        .map_err(|e| WalletError::corrupt_backup(format!("invalid payload: {e}")))?;

    store.import_all(snapshot)?;
    info!("backup restored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;

    #[test]
    fn test_round_trip_reproduces_state_exactly() {
        let store = MemoryStore::seeded();
        let mut wallets = store.load_wallets().unwrap();
        wallets[0].balance = Decimal::new(37, 0);
        store.save_wallets(&wallets).unwrap();

        let blob = create_backup(&store, "1234").unwrap();

        let restored = MemoryStore::new();
        restore_backup(&restored, &blob, "1234").unwrap();

        assert_eq!(restored.load_wallets().unwrap(), wallets);
        assert_eq!(
            restored.load_transactions().unwrap(),
            store.load_transactions().unwrap()
        );
    }

    #[test]
    fn test_wrong_pin_rejected_and_state_untouched() {
        let store = MemoryStore::seeded();
        let blob = create_backup(&store, "1234").unwrap();

        let target = MemoryStore::seeded();
        let before = target.load_wallets().unwrap();

        let result = restore_backup(&target, &blob, "9999");
        assert!(matches!(
            result.unwrap_err(),
            WalletError::CorruptBackup { .. }
        ));
        assert_eq!(target.load_wallets().unwrap(), before);
    }

    #[test]
    fn test_garbage_blob_rejected() {
        let store = MemoryStore::seeded();

        for blob in ["not base64 at all!!", "AAAA", ""] {
            let result = restore_backup(&store, blob, "1234");
            assert!(matches!(
                result.unwrap_err(),
                WalletError::CorruptBackup { .. }
            ));
        }
    }

    #[test]
    fn test_blobs_differ_per_backup() {
        let store = MemoryStore::seeded();
        // Fresh salt and nonce every time
        assert_ne!(
            create_backup(&store, "1234").unwrap(),
            create_backup(&store, "1234").unwrap()
        );
    }

    #[test]
    fn test_payload_missing_collection_rejected() {
        // A validly encrypted payload that is not a full snapshot must be
        // rejected at shape validation.
        let salt = [7u8; SALT_LEN];
        let nonce = [9u8; NONCE_LEN];
        let key = derive_key("1234", &salt);
        let cipher = Aes256Gcm::new(&key.into());
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), br#"{"wallets": []}"# as &[u8])
            .unwrap();

        let mut blob = Vec::new();
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        let blob = BASE64.encode(blob);

        let store = MemoryStore::seeded();
        let before = store.load_wallets().unwrap();
        let result = restore_backup(&store, &blob, "1234");

        assert!(matches!(
            result.unwrap_err(),
            WalletError::CorruptBackup { .. }
        ));
        assert_eq!(store.load_wallets().unwrap(), before);
    }
}
