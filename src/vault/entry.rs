//! The `Entry` type stored inside a vault.
//!
//! Each entry holds a display title, the seed as the user supplied it, and
//! an explicit tag saying whether that seed is hex or base32.  Older
//! payloads carried no tag; those are tagged on load by sniffing the
//! seed's alphabet.

use serde::{Deserialize, Serialize};

use crate::errors::{TotpVaultError, Result};
use crate::otp::secret::{decode_base32, hex_to_base32, is_hex};

/// How an entry's `secret` string is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// RFC 4648 base32, the native TOTP alphabet.
    Base32,
    /// Hex-encoded raw key bytes.
    Hex,
}

impl SecretEncoding {
    /// Guess the encoding of an untagged secret.
    pub fn sniff(secret: &str) -> Self {
        if is_hex(secret) {
            Self::Hex
        } else {
            Self::Base32
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base32 => "base32",
            Self::Hex => "hex",
        }
    }
}

/// A single TOTP seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry")]
pub struct Entry {
    /// Display name (e.g. "GitHub").  Not required to be unique.
    pub title: String,

    /// The seed exactly as supplied.
    pub secret: String,

    /// Alphabet of `secret`.
    pub encoding: SecretEncoding,
}

impl Entry {
    /// Create an entry, tagging the secret's encoding by sniffing it.
    pub fn new(title: &str, secret: &str) -> Self {
        let secret = secret.trim();
        Self {
            title: title.trim().to_string(),
            secret: secret.to_string(),
            encoding: SecretEncoding::sniff(secret),
        }
    }

    /// Create an entry with an explicit encoding tag.
    pub fn with_encoding(title: &str, secret: &str, encoding: SecretEncoding) -> Self {
        Self {
            title: title.trim().to_string(),
            secret: secret.trim().to_string(),
            encoding,
        }
    }

    /// The seed in base32, converting from hex when needed.
    pub fn base32_secret(&self) -> Result<String> {
        match self.encoding {
            SecretEncoding::Base32 => Ok(self.secret.clone()),
            SecretEncoding::Hex => hex_to_base32(&self.secret),
        }
    }

    /// Check that the entry can be stored: non-empty fields and a secret
    /// that decodes under its tagged encoding.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(TotpVaultError::InvalidEntry("title cannot be empty".into()));
        }
        if self.secret.is_empty() {
            return Err(TotpVaultError::InvalidEntry("secret cannot be empty".into()));
        }

        match self.encoding {
            SecretEncoding::Hex => hex::decode(&self.secret)
                .map(|_| ())
                .map_err(|e| TotpVaultError::InvalidEncoding(format!("not valid hex: {e}"))),
            SecretEncoding::Base32 => decode_base32(&self.secret).map(|_| ()),
        }
    }
}

/// On-disk shape accepted when decoding.
///
/// `encoding` is optional for payloads written before entries were
/// tagged, and `hash` is the legacy name of the `secret` field.
#[derive(Deserialize)]
struct StoredEntry {
    title: String,
    #[serde(alias = "hash")]
    secret: String,
    #[serde(default)]
    encoding: Option<SecretEncoding>,
}

impl From<StoredEntry> for Entry {
    fn from(stored: StoredEntry) -> Self {
        let encoding = stored
            .encoding
            .unwrap_or_else(|| SecretEncoding::sniff(&stored.secret));
        Self {
            title: stored.title,
            secret: stored.secret,
            encoding,
        }
    }
}
