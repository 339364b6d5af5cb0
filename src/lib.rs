pub mod audit;
pub mod authenticator;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod otp;
pub mod vault;

#[cfg(feature = "keyring-store")]
pub mod keyring;
