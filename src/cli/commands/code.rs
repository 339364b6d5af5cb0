//! `totpvault code`: print (and optionally copy) one entry's current code.

use chrono::Utc;

use crate::audit::log_audit;
use crate::authenticator::Authenticator;
use crate::cli::output;
use crate::cli::{open_authenticator, Cli};
use crate::errors::{TotpVaultError, Result};
use crate::otp::RefreshClock;

/// Execute the `code` command.
pub fn execute(cli: &Cli, title: &str, copy: bool) -> Result<()> {
    let (auth, _settings) = open_authenticator(cli)?;
    let entries = auth.load_entries()?;
    let entry = Authenticator::find_entry(&entries, title)?;

    let now = Utc::now();
    let code = Authenticator::current_code(entry, now)?;

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| TotpVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(code.clone())
            .map_err(|e| TotpVaultError::CommandFailed(format!("clipboard write failed: {e}")))?;
        output::success(&format!(
            "Code copied: {} (valid for {}s)",
            output::format_code(&code),
            RefreshClock::seconds_remaining(now)
        ));
        log_audit(auth.store().path(), "code", Some(&entry.title), Some("copied"));
    } else {
        println!("{code}");
        log_audit(auth.store().path(), "code", Some(&entry.title), None);
    }

    Ok(())
}
