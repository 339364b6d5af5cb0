//! `totpvault add`: append a seed to the vault.

use std::io::{self, IsTerminal, Read};

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_authenticator, Cli};
use crate::errors::{TotpVaultError, Result};
use crate::vault::SecretEncoding;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    title: &str,
    secret: Option<&str>,
    encoding: Option<SecretEncoding>,
) -> Result<()> {
    // Determine the seed from one of three sources.
    let secret_value = if let Some(s) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Seed provided on command line — it may appear in shell history.");
        s.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter seed for {title}"))
            .interact()
            .map_err(|e| TotpVaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    let (auth, _settings) = open_authenticator(cli)?;
    let entry = match encoding {
        Some(encoding) => auth.add_entry_as(title, &secret_value, encoding)?,
        None => auth.add_entry(title, &secret_value)?,
    };

    log_audit(
        auth.store().path(),
        "add",
        Some(&entry.title),
        Some(entry.encoding.as_str()),
    );

    output::success(&format!(
        "Entry '{}' added ({} seed)",
        entry.title,
        entry.encoding.as_str()
    ));
    output::tip("Run `totpvault list` to see its current code.");

    Ok(())
}
