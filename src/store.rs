//! Reading and writing the configuration file itself.
//!
//! The codec never touches paths; this layer owns them. An advisory lock
//! spans each whole read or write, and reads insist on the exact record
//! size so a clipped or doubled file is reported instead of decoded.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fs2::FileExt;
use log::info;

use crate::legacy::CONFIG_RECORD_LEN;

/// Path of the backup sibling written before an overwrite.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Reads the record bytes under a shared lock.
///
/// Fails unless the file is exactly [`CONFIG_RECORD_LEN`] bytes, naming
/// both the actual and expected sizes.
pub fn read_record_file(path: &Path) -> Result<Vec<u8>> {
    let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    f.lock_shared()
        .with_context(|| format!("locking {}", path.display()))?;
    let result = read_locked(&mut f, path);
    let _ = f.unlock();
    result
}

fn read_locked(f: &mut File, path: &Path) -> Result<Vec<u8>> {
    let len = f.metadata()?.len();
    if len != CONFIG_RECORD_LEN as u64 {
        bail!(
            "{} is {} bytes, expected exactly {}",
            path.display(),
            len,
            CONFIG_RECORD_LEN
        );
    }
    let mut bytes = Vec::with_capacity(CONFIG_RECORD_LEN);
    f.read_to_end(&mut bytes)
        .with_context(|| format!("reading {}", path.display()))?;
    info!("read {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

/// Writes the record bytes under an exclusive lock. The destination is
/// truncated only once the lock is held, so a shared-lock reader never
/// observes a clipped file. With `backup` set, an existing file is first
/// copied to its `.bak` sibling.
pub fn write_record_file(path: &Path, bytes: &[u8], backup: bool) -> Result<()> {
    if bytes.len() != CONFIG_RECORD_LEN {
        bail!(
            "refusing to write {} bytes, the record is exactly {}",
            bytes.len(),
            CONFIG_RECORD_LEN
        );
    }
    if backup && path.exists() {
        let bak = backup_path(path);
        fs::copy(path, &bak)
            .with_context(|| format!("backing up {} to {}", path.display(), bak.display()))?;
        info!("backed up {} to {}", path.display(), bak.display());
    }
    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("creating {}", path.display()))?;
    f.lock_exclusive()
        .with_context(|| format!("locking {}", path.display()))?;
    let result = write_locked(&mut f, path, bytes);
    let _ = f.unlock();
    result
}

fn write_locked(f: &mut File, path: &Path, bytes: &[u8]) -> Result<()> {
    // Truncate under the lock, not at open time.
    f.set_len(0)
        .with_context(|| format!("truncating {}", path.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    f.flush()?;
    f.sync_all()?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
