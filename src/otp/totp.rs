//! Time-based one-time passwords (RFC 6238) on top of HOTP (RFC 4226).
//!
//! Fixed profile: HMAC-SHA-1, 30-second step, 6 digits.  This is what the
//! default `otpauth://totp/` URI implies, so every mainstream
//! authenticator app agrees with the codes produced here.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::secret::decode_base32;
use crate::errors::{TotpVaultError, Result};

/// Length of one TOTP window in seconds.
pub const PERIOD: u64 = 30;

/// Number of digits in a generated code.
pub const DIGITS: u32 = 6;

/// Compute the code for a base32 `secret` at `instant`.
pub fn generate(secret: &str, instant: DateTime<Utc>) -> Result<String> {
    let unix_seconds = u64::try_from(instant.timestamp()).map_err(|_| {
        TotpVaultError::GenerationFailure(format!("instant {instant} is before the Unix epoch"))
    })?;
    generate_at(secret, unix_seconds)
}

/// Compute the code for a base32 `secret` at an explicit Unix timestamp.
pub fn generate_at(secret: &str, unix_seconds: u64) -> Result<String> {
    let key = decode_base32(secret)
        .map_err(|e| TotpVaultError::GenerationFailure(format!("cannot decode secret: {e}")))?;
    hotp(&key, time_step(unix_seconds))
}

/// The TOTP counter for a Unix timestamp.
pub fn time_step(unix_seconds: u64) -> u64 {
    unix_seconds / PERIOD
}

/// HOTP: HMAC-SHA-1 over the big-endian counter, dynamically truncated.
fn hotp(key: &[u8], counter: u64) -> Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key)
        .map_err(|e| TotpVaultError::GenerationFailure(format!("HMAC init failed: {e}")))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    Ok(truncate(&digest))
}

/// Dynamic truncation per RFC 4226 §5.3.
fn truncate(digest: &[u8]) -> String {
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let binary = ((u32::from(digest[offset]) & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);

    let code = binary % 10u32.pow(DIGITS);
    format!("{code:0>width$}", width = DIGITS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4226 Appendix D secret "12345678901234567890".
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn rfc4226_hotp_vectors() {
        let expected = [
            "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583",
            "399871", "520489",
        ];
        let key = decode_base32(RFC_SECRET).unwrap();
        for (counter, code) in expected.iter().enumerate() {
            assert_eq!(hotp(&key, counter as u64).unwrap(), *code, "counter {counter}");
        }
    }

    #[test]
    fn time_step_boundaries() {
        assert_eq!(time_step(0), 0);
        assert_eq!(time_step(29), 0);
        assert_eq!(time_step(30), 1);
        assert_eq!(time_step(59), 1);
        assert_eq!(time_step(60), 2);
    }

    #[test]
    fn codes_are_zero_padded() {
        // T=1111111109 gives 07081804 as an 8-digit code: the 6-digit
        // rendering keeps the leading zero.
        assert_eq!(generate_at(RFC_SECRET, 1_111_111_109).unwrap(), "081804");
    }

    #[test]
    fn pre_epoch_instant_fails() {
        let instant = DateTime::from_timestamp(-1, 0).unwrap();
        assert!(matches!(
            generate(RFC_SECRET, instant),
            Err(TotpVaultError::GenerationFailure(_))
        ));
    }

    #[test]
    fn undecodable_secret_fails() {
        assert!(matches!(
            generate_at("not base32!", 59),
            Err(TotpVaultError::GenerationFailure(_))
        ));
    }
}
