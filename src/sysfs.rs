//! Access to sysfs pseudo-files.
//!
//! The controller never touches `std::fs` directly; it goes through a
//! [`SysfsBackend`]. [`FsBackend`] is the real implementation. Alternative
//! backends exist for tests (call counting, failure injection).
//!
//! Sysfs attributes are written in a single `write(2)`: the kernel treats each
//! write as one command, so values are small ASCII strings without a trailing
//! newline.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// A write-only handle that accepts boost pulse values.
///
/// Implementations must tolerate concurrent writes from several threads
/// through a shared reference.
pub trait PulseSink: Send + Sync {
    /// Write one pulse value.
    ///
    /// # Errors
    ///
    /// Returns a `Write` error if the kernel rejects the value.
    fn write_pulse(&self, value: &str) -> Result<()>;
}

/// File operations the controller needs from sysfs.
pub trait SysfsBackend: Send + Sync {
    /// Handle type returned by [`open_write_only`](Self::open_write_only).
    type Handle: PulseSink;

    /// Read the whole content of `path`.
    ///
    /// # Errors
    ///
    /// `Open` if the file cannot be opened, `Read` if reading fails.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Open `path` write-only for repeated writes. The file is never created.
    ///
    /// # Errors
    ///
    /// `Open` if the file cannot be opened for writing.
    fn open_write_only(&self, path: &Path) -> Result<Self::Handle>;

    /// Open `path`, write `value` once, close it.
    ///
    /// # Errors
    ///
    /// `Open` if the file cannot be opened, `Write` if writing fails.
    fn write_str(&self, path: &Path, value: &str) -> Result<()>;
}

/// Backend over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsBackend;

/// Write-only sysfs file kept open between writes.
#[derive(Debug)]
pub struct SysfsFile {
    file: File,
    path: PathBuf,
}

impl SysfsFile {
    /// Path the handle was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PulseSink for SysfsFile {
    fn write_pulse(&self, value: &str) -> Result<()> {
        // `Write` is implemented for `&File`, no exclusive borrow needed.
        (&self.file)
            .write_all(value.as_bytes())
            .map_err(|e| Error::write(&self.path, &e))
    }
}

impl SysfsBackend for FsBackend {
    type Handle = SysfsFile;

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path).map_err(|e| Error::open(path, &e))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::read(path, &e))?;
        Ok(content)
    }

    fn open_write_only(&self, path: &Path) -> Result<SysfsFile> {
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| Error::open(path, &e))?;
        Ok(SysfsFile {
            file,
            path: path.to_path_buf(),
        })
    }

    fn write_str(&self, path: &Path, value: &str) -> Result<()> {
        // O_TRUNC is ignored by sysfs and keeps regular files exact.
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::open(path, &e))?;
        file.write_all(value.as_bytes())
            .map_err(|e| Error::write(path, &e))
    }
}

/// Strip trailing newline and carriage-return characters.
///
/// Other whitespace, leading or embedded, is preserved.
#[must_use]
pub fn trim_newlines(value: &str) -> &str {
    value.trim_end_matches(['\n', '\r'])
}
