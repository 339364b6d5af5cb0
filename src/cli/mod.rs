//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use zeroize::Zeroizing;

use crate::authenticator::Authenticator;
use crate::config::Settings;
use crate::errors::{TotpVaultError, Result};
use crate::vault::SecretEncoding;

/// Minimum passphrase length to prevent trivially weak passphrases.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the passphrase.
pub const PASSPHRASE_ENV: &str = "TOTPVAULT_PASSPHRASE";

/// totpvault CLI: encrypted TOTP authenticator.
#[derive(Parser)]
#[command(
    name = "totpvault",
    about = "Encrypted TOTP authenticator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory holding .totpvault.toml and the vault (default: .)
    #[arg(short, long, default_value = ".", global = true)]
    pub dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a salt, choose a passphrase and create an empty vault
    Init,

    /// Add a TOTP seed
    Add {
        /// Display name (e.g. GitHub)
        title: String,
        /// Base32 or hex seed (omit for interactive prompt)
        secret: Option<String>,
        /// Seed alphabet; guessed from the seed when omitted
        #[arg(long, value_enum)]
        encoding: Option<SecretEncoding>,
    },

    /// List all entries with their current codes
    List,

    /// Print the current code for one entry
    Code {
        /// Entry title
        title: String,
        /// Also copy the code to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Print the otpauth:// provisioning URI for one entry
    Uri {
        /// Entry title
        title: String,
    },

    /// Export an entry as a QR code image
    Export {
        /// Entry title
        title: String,

        /// Output PNG path (default: <title>.png)
        #[arg(short, long)]
        output: Option<String>,

        /// Image side length in pixels (default: from config, 384)
        #[arg(long)]
        size: Option<u32>,

        /// Print a data:image/png;base64 URI instead of writing a file
        #[arg(long)]
        data_uri: bool,
    },

    /// Show codes continuously, refreshing at every 30-second boundary
    Watch,

    /// Manage the OS keyring passphrase
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

/// Auth subcommands for keyring management.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Save the vault passphrase to the OS keyring (auto-unlock)
    Keyring {
        /// Remove the passphrase from the keyring instead of saving
        #[arg(long)]
        delete: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault passphrase, trying in order:
/// 1. `TOTPVAULT_PASSPHRASE` env var (scripts, tests)
/// 2. OS keyring (if compiled with `keyring-store` feature)
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_password_for_vault(vault_id: Option<&str>) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSPHRASE_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    #[cfg(feature = "keyring-store")]
    if let Some(id) = vault_id {
        // Unavailable keyring or no stored entry: fall through to the prompt.
        if let Ok(Some(pw)) = crate::keyring::get_password(id) {
            return Ok(Zeroizing::new(pw));
        }
    }

    #[cfg(not(feature = "keyring-store"))]
    let _ = vault_id;

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault passphrase")
        .interact()
        .map_err(|e| TotpVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used during `init`).
///
/// Also respects `TOTPVAULT_PASSPHRASE` for scripted usage.
/// Enforces a minimum passphrase length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSPHRASE_ENV) {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(TotpVaultError::CommandFailed(format!(
                    "passphrase must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault passphrase")
            .with_confirmation(
                "Confirm vault passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| TotpVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Resolve the project directory from the CLI arguments.
pub fn project_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(&cli.dir))
}

/// Load settings, obtain the passphrase and open the authenticator.
///
/// Returns the settings alongside so commands can read defaults such as
/// the vault path or QR size.
pub fn open_authenticator(cli: &Cli) -> Result<(Authenticator, Settings)> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(&dir)?;

    // Fail on a missing salt before asking for a passphrase.
    settings.salt_bytes()?;

    let vault_path = settings.vault_path(&dir);
    let vault_id = vault_path.to_string_lossy();
    let password = prompt_password_for_vault(Some(&vault_id))?;

    let auth = Authenticator::from_settings(&settings, &dir, password.as_bytes())?;
    Ok((auth, settings))
}
