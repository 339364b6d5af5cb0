//! Project configuration (`.totpvault.toml`).

pub mod settings;

pub use settings::Settings;
