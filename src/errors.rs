use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in totpvault.
#[derive(Debug, Error)]
pub enum TotpVaultError {
    // --- Crypto errors ---
    #[error("Authentication failed — wrong passphrase or the vault file was tampered with")]
    AuthenticationFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault already exists at {}", .0.display())]
    VaultAlreadyExists(PathBuf),

    // --- Payload / entry errors ---
    #[error("Malformed vault payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    // --- Encoding errors ---
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Code generation failed: {0}")]
    GenerationFailure(String),

    #[error("QR encoding failed: {0}")]
    EncodingFailure(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for totpvault results.
pub type Result<T> = std::result::Result<T, TotpVaultError>;
