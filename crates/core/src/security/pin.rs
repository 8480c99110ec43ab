use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::storage::encryption::{self, KdfParams};

/// Number of digits in an app PIN.
pub const PIN_LENGTH: usize = 4;

/// A salted Argon2id hash of the app PIN. The PIN itself is never stored.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PinLock {
    salt: [u8; 16],
    hash: [u8; 32],
    kdf_params: KdfParams,
}

impl std::fmt::Debug for PinLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinLock")
            .field("kdf_params", &self.kdf_params)
            .finish_non_exhaustive()
    }
}

impl PinLock {
    /// Hash a new PIN with a fresh random salt.
    pub fn new(pin: &str) -> Result<Self, CoreError> {
        validate_pin(pin)?;
        let salt = encryption::generate_salt()?;
        let kdf_params = KdfParams::for_pin();
        let hash = encryption::derive_key(pin, &salt, &kdf_params)?;
        Ok(Self {
            salt,
            hash,
            kdf_params,
        })
    }

    /// Returns `true` if `pin` matches the stored hash.
    /// Malformed input simply fails to match.
    pub fn verify(&self, pin: &str) -> bool {
        if validate_pin(pin).is_err() {
            return false;
        }
        match encryption::derive_key(pin, &self.salt, &self.kdf_params) {
            Ok(candidate) => candidate == self.hash,
            Err(e) => {
                tracing::warn!(error = %e, "PIN verification could not derive key");
                false
            }
        }
    }
}

/// A PIN is exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> Result<(), CoreError> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::ValidationError(format!(
            "PIN must be exactly {PIN_LENGTH} digits"
        )));
    }
    Ok(())
}
