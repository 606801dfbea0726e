//! Appending entries to the destination note
//!
//! The note is append-only: existing bytes are never rewritten. When the
//! current content does not end with a newline a single `\n` is written
//! before the entry so it starts on its own line.
//!
//! Appends are not crash-atomic. A crash mid-write can leave a partial
//! entry at the end of the note.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

/// Append `entry` to the note at `path`, creating the file if needed
pub fn append_entry(path: &Path, entry: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::from_io(e, path.to_path_buf()))?;

    let needs_separator = !ends_with_newline(&mut file)
        .map_err(|source| Error::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

    let mut data = String::with_capacity(entry.len() + 1);
    if needs_separator {
        data.push('\n');
    }
    data.push_str(entry);

    file.write_all(data.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| Error::from_io(e, path.to_path_buf()))?;

    info!("Appended {} bytes to {:?}", data.len(), path);
    Ok(())
}

/// Whether the file is empty or its last byte is `\n`
fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok(true);
    }

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));

    if path == "~" {
        return home();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => PathBuf::from(path),
    }
}
