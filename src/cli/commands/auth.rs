//! `totpvault auth keyring`: store or remove the vault passphrase in the
//! OS keyring.
//!
//! When the keyring feature is not compiled in, the command returns a
//! helpful error message.

use crate::cli::Cli;
use crate::errors::Result;

/// Execute `totpvault auth keyring`: save or delete the passphrase.
pub fn execute_keyring(cli: &Cli, delete: bool) -> Result<()> {
    #[cfg(feature = "keyring-store")]
    {
        use crate::authenticator::Authenticator;
        use crate::cli::output;
        use crate::config::Settings;

        let dir = crate::cli::project_dir(cli)?;
        let settings = Settings::load(&dir)?;
        let vault_id = settings.vault_path(&dir).to_string_lossy().to_string();

        if delete {
            crate::keyring::delete_password(&vault_id)?;
            output::success("Passphrase removed from OS keyring.");
        } else {
            // Verify the passphrase opens the vault before storing it.
            // Skip the keyring lookup: the user is explicitly setting it.
            let password = crate::cli::prompt_password_for_vault(None)?;
            let auth = Authenticator::from_settings(&settings, &dir, password.as_bytes())?;
            auth.load_entries()?;

            crate::keyring::store_password(&vault_id, &password)?;
            output::success("Passphrase saved to OS keyring. Future opens will be automatic.");
        }

        Ok(())
    }

    #[cfg(not(feature = "keyring-store"))]
    {
        let _ = (cli, delete);
        Err(crate::errors::TotpVaultError::KeyringError(
            "keyring support not compiled — rebuild with `cargo build --features keyring-store`"
                .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn keyring_disabled_returns_error() {
        #[cfg(not(feature = "keyring-store"))]
        {
            use clap::Parser;
            let cli = crate::cli::Cli::parse_from(["totpvault", "auth", "keyring"]);
            let result = super::execute_keyring(&cli, false);
            assert!(result.is_err());
            let msg = result.unwrap_err().to_string();
            assert!(
                msg.contains("keyring support not compiled"),
                "unexpected error: {msg}"
            );
        }
    }
}
