//! The encrypted vault file.
//!
//! `VaultStore` owns the single file holding `nonce || ciphertext || tag`.
//! Every mutation rewrites the whole file: load the full list, change it
//! in memory, seal it again and replace the file atomically.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::encryption::{open, seal};
use crate::crypto::keys::VaultKey;
use crate::errors::Result;

use super::codec;
use super::entry::Entry;

/// Handle on one vault file and the key that seals it.
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// The derived vault key (zeroized on drop).
    key: VaultKey,
}

impl VaultStore {
    pub fn new(path: &Path, key: VaultKey) -> Self {
        Self {
            path: path.to_path_buf(),
            key,
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write a sealed empty list if no vault file exists yet.
    ///
    /// Returns `true` when a new file was created.  Only "not found"
    /// triggers the bootstrap; any other error (permission denied, a
    /// broken mount) is returned so an unreadable vault is never
    /// overwritten.
    pub fn ensure_exists(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(false),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.save(&[])?;
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read, authenticate and decode every entry, bootstrapping an empty
    /// vault first if the file is absent.
    pub fn load(&self) -> Result<Vec<Entry>> {
        self.ensure_exists()?;

        let blob = fs::read(&self.path)?;
        let plaintext = Zeroizing::new(open(&self.key, &blob)?);
        codec::decode(&plaintext)
    }

    /// Serialize, seal and atomically replace the vault file.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let payload = Zeroizing::new(codec::encode(entries)?);
        let blob = seal(&self.key, &payload)?;
        write_atomic(&self.path, &blob)
    }

    /// Append `entry` to the stored list and persist the result.
    ///
    /// Returns the full list as written.
    pub fn add_entry(&self, entry: Entry) -> Result<Vec<Entry>> {
        entry.validate()?;

        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)?;

        Ok(entries)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `bytes` to a temp file next to `path`, then rename it into place.
///
/// The temp file is in the same directory so the rename stays on one
/// filesystem.  It is created owner read/write only.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    if let Err(e) = write_then_rename(&tmp_path, path, bytes) {
        // Never leave a sealed copy lying next to the vault.
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    // `mode` only applies on creation; a stale temp file keeps its old bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(tmp_path, path)
}
