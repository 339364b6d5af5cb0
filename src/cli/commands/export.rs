//! `totpvault export`: export one entry as a QR code.
//!
//! Writes a PNG file (default `<title>.png`) or, with `--data-uri`, prints
//! a `data:image/png;base64,` URI to stdout.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::audit::log_audit;
use crate::authenticator::Authenticator;
use crate::cli::output;
use crate::cli::{open_authenticator, Cli};
use crate::errors::{TotpVaultError, Result};

/// Execute the `export` command.
pub fn execute(
    cli: &Cli,
    title: &str,
    output_path: Option<&str>,
    size: Option<u32>,
    data_uri: bool,
) -> Result<()> {
    let (auth, _settings) = open_authenticator(cli)?;
    let auth = match size {
        Some(px) => auth.with_qr_size(px),
        None => auth,
    };

    let entries = auth.load_entries()?;
    let entry = Authenticator::find_entry(&entries, title)?;

    if data_uri {
        let uri = auth.export_data_uri(entry)?;
        log_audit(auth.store().path(), "export", Some(&entry.title), Some("data uri"));
        println!("{uri}");
        return Ok(());
    }

    let dest = match output_path {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(default_file_name(&entry.title)),
    };

    // Safety: refuse to overwrite the vault file.
    if same_file(&dest, auth.store().path()) {
        return Err(TotpVaultError::CommandFailed(
            "refusing to export over the vault file".into(),
        ));
    }

    let png = auth.export_image(entry)?;
    write_private(&dest, &png)?;

    log_audit(
        auth.store().path(),
        "export",
        Some(&entry.title),
        Some(&format!("png: {}", dest.display())),
    );

    output::success(&format!(
        "Exported QR code for '{}' to {}",
        entry.title,
        dest.display()
    ));
    output::warning("The image contains the seed. Delete it once scanned.");

    Ok(())
}

/// `<title>.png` with path separators replaced.
fn default_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "entry.png".to_string()
    } else {
        format!("{stem}.png")
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Write `bytes` to `path`, readable only by the owner on Unix.
fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }

    let mut file = opts.open(path).map_err(|e| {
        TotpVaultError::CommandFailed(format!("failed to write export file: {e}"))
    })?;
    file.write_all(bytes)?;
    file.sync_all()?;

    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
