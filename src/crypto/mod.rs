//! Cryptographic primitives for totpvault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key derivation from a `KdfConfig` (`kdf`)
//! - The zeroizing `VaultKey` holder (`keys`)
//! - AES-256-GCM seal and open of the vault payload (`encryption`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, KeyDeriver, ...};
pub use encryption::{open, seal};
pub use kdf::{generate_salt, KdfConfig, KeyDeriver, DEFAULT_ITERATIONS};
pub use keys::VaultKey;
