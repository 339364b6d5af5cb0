//! `totpvault uri`: print one entry's `otpauth://` provisioning URI.

use crate::audit::log_audit;
use crate::authenticator::Authenticator;
use crate::cli::output;
use crate::cli::{open_authenticator, Cli};
use crate::errors::Result;

/// Execute the `uri` command.
pub fn execute(cli: &Cli, title: &str) -> Result<()> {
    let (auth, _settings) = open_authenticator(cli)?;
    let entries = auth.load_entries()?;
    let entry = Authenticator::find_entry(&entries, title)?;

    let uri = auth.provisioning_uri(entry)?;

    log_audit(auth.store().path(), "uri", Some(&entry.title), None);

    output::warning("This URI contains the seed in clear text.");
    println!("{uri}");

    Ok(())
}
