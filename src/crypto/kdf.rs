//! Passphrase-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The passphrase, salt and iteration count arrive through a `KdfConfig`
//! built at startup (prompt, environment, keyring and `.totpvault.toml`).
//! Nothing secret is compiled into the binary.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{TotpVaultError, Result};

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 4096;

/// Length of a freshly generated salt in bytes (256 bits).
const SALT_LEN: usize = 32;

/// Inputs to the key derivation.
///
/// The passphrase is held in `Zeroizing` so it is wiped when the config
/// is dropped.
pub struct KdfConfig {
    passphrase: Zeroizing<Vec<u8>>,
    salt: Vec<u8>,
    iterations: u32,
}

impl KdfConfig {
    /// Build a config, rejecting an empty salt or a zero iteration count.
    pub fn new(passphrase: &[u8], salt: &[u8], iterations: u32) -> Result<Self> {
        if salt.is_empty() {
            return Err(TotpVaultError::KeyDerivationFailed(
                "salt must not be empty".into(),
            ));
        }
        if iterations < 1 {
            return Err(TotpVaultError::KeyDerivationFailed(
                "PBKDF2 iterations must be at least 1".into(),
            ));
        }

        Ok(Self {
            passphrase: Zeroizing::new(passphrase.to_vec()),
            salt: salt.to_vec(),
            iterations,
        })
    }

    /// Returns the configured iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Turns a `KdfConfig` into the 32-byte vault key.
pub struct KeyDeriver {
    config: KdfConfig,
}

impl KeyDeriver {
    pub fn new(config: KdfConfig) -> Self {
        Self { config }
    }

    /// Derive the vault key.
    ///
    /// Deterministic: the same passphrase, salt and iteration count always
    /// produce the same key.
    pub fn derive(&self) -> VaultKey {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(
            &self.config.passphrase,
            &self.config.salt,
            self.config.iterations,
            &mut key,
        );
        VaultKey::new(key)
    }
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
