//! The interface presentation layers call into.
//!
//! `Authenticator` ties the vault file to code generation and QR export:
//! load and add entries, compute the current code for each one, and turn
//! an entry back into a scannable provisioning image.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::crypto::KeyDeriver;
use crate::errors::{TotpVaultError, Result};
use crate::otp::{build_uri, provision, totp, DEFAULT_ISSUER, DEFAULT_QR_SIZE};
use crate::vault::{Entry, SecretEncoding, VaultStore};

/// An entry paired with its code (or the reason it has none).
pub struct EntryCode<'a> {
    pub entry: &'a Entry,
    pub code: Result<String>,
}

pub struct Authenticator {
    store: VaultStore,
    issuer: String,
    qr_size: u32,
}

impl Authenticator {
    pub fn new(store: VaultStore) -> Self {
        Self {
            store,
            issuer: DEFAULT_ISSUER.to_string(),
            qr_size: DEFAULT_QR_SIZE,
        }
    }

    /// Derive the vault key from `passphrase` and the configured salt, and
    /// open the vault file named by `settings` under `project_dir`.
    pub fn from_settings(settings: &Settings, project_dir: &Path, passphrase: &[u8]) -> Result<Self> {
        let key = KeyDeriver::new(settings.kdf_config(passphrase)?).derive();
        let store = VaultStore::new(&settings.vault_path(project_dir), key);

        Ok(Self::new(store)
            .with_issuer(&settings.issuer)
            .with_qr_size(settings.qr_size))
    }

    /// Override the issuer label written into provisioning URIs.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Override the side length of exported QR images.
    #[must_use]
    pub fn with_qr_size(mut self, qr_size: u32) -> Self {
        self.qr_size = qr_size;
        self
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    /// Load all entries in display order.
    ///
    /// Decrypt failures are returned as-is; deciding to show an empty
    /// list instead is up to the caller.
    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        self.store.load()
    }

    /// Validate, append and persist a new entry, guessing its encoding.
    pub fn add_entry(&self, title: &str, secret: &str) -> Result<Entry> {
        self.insert(Entry::new(title, secret))
    }

    /// Like `add_entry`, with the seed's encoding given explicitly.
    pub fn add_entry_as(&self, title: &str, secret: &str, encoding: SecretEncoding) -> Result<Entry> {
        self.insert(Entry::with_encoding(title, secret, encoding))
    }

    fn insert(&self, entry: Entry) -> Result<Entry> {
        self.store.add_entry(entry.clone())?;
        Ok(entry)
    }

    /// First entry whose title matches exactly.
    pub fn find_entry<'a>(entries: &'a [Entry], title: &str) -> Result<&'a Entry> {
        entries
            .iter()
            .find(|e| e.title == title)
            .ok_or_else(|| TotpVaultError::EntryNotFound(title.to_string()))
    }

    // ------------------------------------------------------------------
    // Codes
    // ------------------------------------------------------------------

    /// The code for `entry` at `now`.
    pub fn current_code(entry: &Entry, now: DateTime<Utc>) -> Result<String> {
        let secret = entry
            .base32_secret()
            .map_err(|e| TotpVaultError::GenerationFailure(e.to_string()))?;
        totp::generate(&secret, now)
    }

    /// Codes for every entry; one failure never affects the others.
    pub fn codes_at(entries: &[Entry], now: DateTime<Utc>) -> Vec<EntryCode<'_>> {
        entries
            .iter()
            .map(|entry| EntryCode {
                entry,
                code: Self::current_code(entry, now),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// The `otpauth://` URI for `entry`, with hex seeds converted to base32.
    pub fn provisioning_uri(&self, entry: &Entry) -> Result<String> {
        let secret = entry.base32_secret()?;
        Ok(build_uri(&entry.title, &secret, &self.issuer))
    }

    /// PNG bytes of the QR code for `entry`'s provisioning URI.
    pub fn export_image(&self, entry: &Entry) -> Result<Vec<u8>> {
        provision::render_qr(&self.provisioning_uri(entry)?, self.qr_size)
    }

    /// The QR code for `entry` as a `data:image/png;base64,` URI.
    pub fn export_data_uri(&self, entry: &Entry) -> Result<String> {
        provision::qr_data_uri(&self.provisioning_uri(entry)?, self.qr_size)
    }
}
