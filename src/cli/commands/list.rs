//! `totpvault list`: display every entry with its current code.

use chrono::Utc;

use crate::audit::log_audit;
use crate::authenticator::Authenticator;
use crate::cli::output;
use crate::cli::{open_authenticator, Cli};
use crate::errors::{TotpVaultError, Result};
use crate::otp::RefreshClock;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (auth, _settings) = open_authenticator(cli)?;

    // An undecryptable vault shows as empty with a warning, not a crash.
    let entries = match auth.load_entries() {
        Ok(entries) => entries,
        Err(e @ TotpVaultError::AuthenticationFailure) => {
            log_audit(auth.store().path(), "load-failed", None, Some("authentication failure"));
            output::warning(&e.to_string());
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let now = Utc::now();
    let codes = Authenticator::codes_at(&entries, now);

    output::info(&format!(
        "{} entr{} — next refresh in {}s",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        RefreshClock::seconds_remaining(now)
    ));

    output::print_codes_table(&codes);

    Ok(())
}
