//! Vault module: encrypted seed storage.
//!
//! This module provides:
//! - `Entry` and `SecretEncoding` types (`entry`)
//! - JSON encoding of the ordered entry list (`codec`)
//! - `VaultStore` for loading and saving the sealed vault file (`store`)

pub mod codec;
pub mod entry;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, SecretEncoding};
pub use store::VaultStore;
