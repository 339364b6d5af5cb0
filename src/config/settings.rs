use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfConfig, DEFAULT_ITERATIONS};
use crate::errors::{TotpVaultError, Result};
use crate::otp::{DEFAULT_ISSUER, DEFAULT_QR_SIZE};

/// Project-level configuration, loaded from `.totpvault.toml`.
///
/// Every field except `kdf_salt` has a default.  The salt is generated
/// by `totpvault init` so no two installations share one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file path (relative to the project directory).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Issuer label written into provisioning URIs.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Side length of exported QR images in pixels.
    #[serde(default = "default_qr_size")]
    pub qr_size: u32,

    /// PBKDF2 iteration count (default: 4096).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Hex-encoded PBKDF2 salt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf_salt: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "securedata.bin".to_string()
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_qr_size() -> u32 {
    DEFAULT_QR_SIZE
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            issuer: default_issuer(),
            qr_size: default_qr_size(),
            kdf_iterations: default_kdf_iterations(),
            kdf_salt: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project directory.
    pub const FILE_NAME: &'static str = ".totpvault.toml";

    /// Load settings from `<project_dir>/.totpvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = Self::path(project_dir);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            TotpVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Write these settings to `<project_dir>/.totpvault.toml`.
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TotpVaultError::ConfigError(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(Self::path(project_dir), contents)?;
        Ok(())
    }

    /// Full path of the config file for a project directory.
    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(Self::FILE_NAME)
    }

    /// Build the full path to the vault file.
    ///
    /// Example: `project_dir/securedata.bin`
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }

    /// Decode the configured salt.
    pub fn salt_bytes(&self) -> Result<Vec<u8>> {
        let salt = self.kdf_salt.as_deref().ok_or_else(|| {
            TotpVaultError::ConfigError(
                "no kdf_salt configured — run `totpvault init` first".into(),
            )
        })?;
        hex::decode(salt)
            .map_err(|e| TotpVaultError::ConfigError(format!("kdf_salt is not valid hex: {e}")))
    }

    /// Combine the configured salt and iterations with a passphrase.
    pub fn kdf_config(&self, passphrase: &[u8]) -> Result<KdfConfig> {
        KdfConfig::new(passphrase, &self.salt_bytes()?, self.kdf_iterations)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_file, "securedata.bin");
        assert_eq!(s.issuer, "TOTP-CLI");
        assert_eq!(s.qr_size, 384);
        assert_eq!(s.kdf_iterations, 4096);
        assert!(s.kdf_salt.is_none());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "securedata.bin");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_file = "seeds.bin"
issuer = "Home"
qr_size = 512
kdf_iterations = 10000
kdf_salt = "00ff"
"#;
        fs::write(tmp.path().join(".totpvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "seeds.bin");
        assert_eq!(settings.issuer, "Home");
        assert_eq!(settings.qr_size, 512);
        assert_eq!(settings.kdf_iterations, 10_000);
        assert_eq!(settings.salt_bytes().unwrap(), vec![0x00, 0xff]);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".totpvault.toml"), "issuer = \"Work\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.issuer, "Work");
        assert_eq!(settings.vault_file, "securedata.bin");
        assert_eq!(settings.kdf_iterations, 4096);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".totpvault.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            kdf_salt: Some("abcd".into()),
            ..Settings::default()
        };
        settings.save(tmp.path()).unwrap();

        let loaded = Settings::load(tmp.path()).unwrap();
        assert_eq!(loaded.kdf_salt.as_deref(), Some("abcd"));
    }

    #[test]
    fn kdf_config_requires_salt() {
        let s = Settings::default();
        assert!(matches!(
            s.kdf_config(b"passphrase"),
            Err(TotpVaultError::ConfigError(_))
        ));
    }

    #[test]
    fn kdf_config_rejects_bad_salt_hex() {
        let s = Settings {
            kdf_salt: Some("zz".into()),
            ..Settings::default()
        };
        assert!(s.salt_bytes().is_err());
    }

    #[test]
    fn vault_path_respects_custom_file() {
        let s = Settings {
            vault_file: "data/seeds.bin".to_string(),
            ..Settings::default()
        };
        let path = s.vault_path(Path::new("/home/user"));
        assert_eq!(path, PathBuf::from("/home/user/data/seeds.bin"));
    }
}
