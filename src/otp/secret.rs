//! Hex and base32 handling for TOTP seeds.
//!
//! Seeds reach the vault either as RFC 4648 base32 (what authenticator
//! apps print) or as hex (what some providers export).  Provisioning URIs
//! and the TOTP algorithm both want base32.

use base32::Alphabet;

use crate::errors::{TotpVaultError, Result};

/// Unpadded RFC 4648 alphabet.
const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Returns `true` if `s` is an even-length string of `0-9a-fA-F` characters.
///
/// The empty string counts as hex (it decodes to zero bytes).
pub fn is_hex(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Transcode a hex string into unpadded base32.
pub fn hex_to_base32(hex_str: &str) -> Result<String> {
    let raw = hex::decode(hex_str)
        .map_err(|e| TotpVaultError::InvalidEncoding(format!("not valid hex: {e}")))?;
    Ok(base32::encode(ALPHABET, &raw))
}

/// Decode a base32 seed into raw key bytes.
///
/// Whitespace and `-` separators are ignored, letters are case-insensitive
/// and trailing `=` padding is tolerated.
pub fn decode_base32(secret: &str) -> Result<Vec<u8>> {
    let cleaned: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .trim_end_matches('=')
        .to_ascii_uppercase();

    if cleaned.is_empty() {
        return Err(TotpVaultError::InvalidEncoding("base32 secret is empty".into()));
    }

    // 1, 3 or 6 trailing characters cannot come from whole bytes.
    if matches!(cleaned.len() % 8, 1 | 3 | 6) {
        return Err(TotpVaultError::InvalidEncoding(format!(
            "base32 secret has invalid length {}",
            cleaned.len()
        )));
    }

    base32::decode(ALPHABET, &cleaned)
        .ok_or_else(|| TotpVaultError::InvalidEncoding("not valid base32".into()))
}
