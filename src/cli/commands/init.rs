//! `totpvault init`: generate a salt, choose a passphrase, create an empty vault.

use std::fs;

use crate::audit::log_audit;
use crate::authenticator::Authenticator;
use crate::cli::output;
use crate::cli::{project_dir, prompt_new_password, Cli};
use crate::config::Settings;
use crate::crypto::generate_salt;
use crate::errors::{TotpVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = project_dir(cli)?;

    // 1. Create the project directory if it doesn't exist.
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        output::info(&format!("Created directory: {}", dir.display()));
    }

    // 2. Refuse to touch an existing vault.
    let mut settings = Settings::load(&dir)?;
    let vault_path = settings.vault_path(&dir);
    if vault_path.exists() {
        output::tip("Use `totpvault add` to add seeds to the existing vault.");
        return Err(TotpVaultError::VaultAlreadyExists(vault_path));
    }

    // 3. Give this installation its own salt.
    if settings.kdf_salt.is_none() {
        settings.kdf_salt = Some(hex::encode(generate_salt()));
        settings.save(&dir)?;
        output::info(&format!(
            "Wrote {} with a fresh key-derivation salt",
            Settings::path(&dir).display()
        ));
    }

    // 4. Choose the passphrase and write the sealed empty list.
    let password = prompt_new_password()?;
    let auth = Authenticator::from_settings(&settings, &dir, password.as_bytes())?;
    auth.store().ensure_exists()?;

    output::success(&format!("Vault created at {}", vault_path.display()));

    log_audit(&vault_path, "init", None, Some("vault created"));

    output::tip("Run `totpvault add <TITLE>` to add a seed.");
    output::tip("Run `totpvault list` to see current codes.");

    Ok(())
}
