//! `totpvault watch`: keep the code table on screen, redrawing it at
//! every 30-second boundary with a countdown in between.

use std::io::Write;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use console::{style, Term};

use crate::authenticator::Authenticator;
use crate::cli::output;
use crate::cli::{open_authenticator, Cli};
use crate::errors::Result;
use crate::otp::RefreshClock;

const BAR_WIDTH: usize = 30;

/// Execute the `watch` command. Runs until interrupted.
pub fn execute(cli: &Cli) -> Result<()> {
    let (auth, _settings) = open_authenticator(cli)?;
    let entries = auth.load_entries()?;

    if entries.is_empty() {
        output::info("Vault is empty. Add a seed with `totpvault add <TITLE>`.");
        return Ok(());
    }

    let term = Term::stdout();
    let mut clock = RefreshClock::new();

    loop {
        let now = Utc::now();

        if clock.poll(now) {
            term.clear_screen()?;
            println!("{}", style("totpvault watch (Ctrl-C to quit)").bold());
            output::print_codes_table(&Authenticator::codes_at(&entries, now));
        }

        print!(
            "\r{} {:>2}s ",
            progress_bar(RefreshClock::progress(now)),
            RefreshClock::seconds_remaining(now)
        );
        std::io::stdout().flush()?;

        thread::sleep(Duration::from_secs(1));
    }
}

/// A fixed-width bar with `fraction` of it filled.
fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}
