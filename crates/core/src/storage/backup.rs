use crate::errors::CoreError;
use crate::models::backup::BackupSnapshot;

use super::encryption::{self, KdfParams};
use super::format;

/// Encodes and decodes whole-state backup snapshots.
///
/// Two encodings:
/// - plain JSON, for user-visible export files
/// - encrypted binary: snapshot → bincode → AES-256-GCM(Argon2id(password)) → framed bytes
///
/// Decoding either form fully validates the snapshot before returning it,
/// so a restore is all-or-nothing.
pub struct BackupManager;

impl BackupManager {
    /// Serialize a snapshot to pretty-printed JSON.
    pub fn to_json(snapshot: &BackupSnapshot) -> Result<String, CoreError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize backup: {e}")))
    }

    /// Parse and validate a JSON snapshot.
    pub fn from_json(json: &str) -> Result<BackupSnapshot, CoreError> {
        let snapshot: BackupSnapshot = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidBackup(format!("malformed JSON: {e}")))?;
        Self::validate(&snapshot)?;
        Ok(snapshot)
    }

    /// Encrypt a snapshot with a password.
    pub fn encrypt(snapshot: &BackupSnapshot, password: &str) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize backup: {e}")))?;

        let salt = encryption::generate_salt()?;
        let nonce = encryption::generate_nonce()?;

        let kdf_params = KdfParams::default();
        let key = encryption::derive_key(password, &salt, &kdf_params)?;

        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        Ok(format::write_frame(
            format::CURRENT_VERSION,
            &kdf_params,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// Decrypt and validate an encrypted snapshot.
    pub fn decrypt(data: &[u8], password: &str) -> Result<BackupSnapshot, CoreError> {
        let (header, ciphertext) = format::read_frame(data)?;

        let key = encryption::derive_key(password, &header.salt, &header.kdf_params)?;
        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;

        let snapshot: BackupSnapshot = bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::InvalidBackup(format!("undecodable payload: {e}")))?;
        Self::validate(&snapshot)?;
        Ok(snapshot)
    }

    /// Write an encrypted backup to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(
        snapshot: &BackupSnapshot,
        path: impl AsRef<std::path::Path>,
        password: &str,
    ) -> Result<(), CoreError> {
        let bytes = Self::encrypt(snapshot, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read an encrypted backup from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(
        path: impl AsRef<std::path::Path>,
        password: &str,
    ) -> Result<BackupSnapshot, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::decrypt(&bytes, password)
    }

    /// Reject snapshots whose records break the data-model invariants.
    fn validate(snapshot: &BackupSnapshot) -> Result<(), CoreError> {
        if let Some(tx) = snapshot
            .transactions
            .iter()
            .find(|t| !t.amount.is_finite() || t.amount < 0.0)
        {
            return Err(CoreError::InvalidBackup(format!(
                "transaction {} has invalid amount {}",
                tx.id, tx.amount
            )));
        }
        if let Some(budget) = snapshot
            .budgets
            .iter()
            .find(|b| !b.limit.is_finite() || b.limit < 0.0)
        {
            return Err(CoreError::InvalidBackup(format!(
                "budget {} has invalid limit {}",
                budget.id, budget.limit
            )));
        }
        Ok(())
    }
}
