//! OS keyring storage for the vault passphrase.
//!
//! Stores and retrieves the passphrase from the operating system's
//! secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! All operations fail gracefully: if the keyring is unavailable, the
//! error is returned and the caller falls back to a passphrase prompt.

use crate::errors::{TotpVaultError, Result};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "totpvault";

/// Keyring account name for a vault path.
fn entry_key(vault_path: &str) -> String {
    format!("vault:{vault_path}")
}

fn entry(vault_path: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, &entry_key(vault_path))
        .map_err(|e| TotpVaultError::KeyringError(format!("failed to create keyring entry: {e}")))
}

/// Store the passphrase for a specific vault.
pub fn store_password(vault_path: &str, password: &str) -> Result<()> {
    entry(vault_path)?.set_password(password).map_err(|e| {
        TotpVaultError::KeyringError(format!("failed to store passphrase in keyring: {e}"))
    })
}

/// Retrieve the passphrase for a specific vault.
///
/// Returns `None` if nothing is stored (rather than an error).
pub fn get_password(vault_path: &str) -> Result<Option<String>> {
    match entry(vault_path)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(TotpVaultError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

/// Delete a stored passphrase.
pub fn delete_password(vault_path: &str) -> Result<()> {
    match entry(vault_path)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(TotpVaultError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}
