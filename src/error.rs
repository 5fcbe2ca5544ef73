//! Error types for powerhint.
//!
//! All errors implement `std::error::Error` and provide human-readable messages.
//! Every sysfs failure records the path it happened on and the
//! [`std::io::ErrorKind`] reported by the kernel, so callers can tell a missing
//! tunable (governor not loaded) apart from a permission problem.
//!
//! None of these errors cross the host-facing surface: `init`, `set_interactive`
//! and `hint` log them and carry on.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Primary error type for powerhint operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sysfs file could not be opened.
    ///
    /// Usually the governor owning the tunable is not active (`NotFound`) or
    /// the process lacks write access (`PermissionDenied`).
    #[error("error opening {}: {message}", path.display())]
    Open {
        /// The sysfs path that failed to open.
        path: PathBuf,
        /// The I/O error kind reported by the OS.
        kind: io::ErrorKind,
        /// Human-readable error message.
        message: String,
    },

    /// A sysfs file was opened but reading it failed.
    #[error("error reading {}: {message}", path.display())]
    Read {
        /// The sysfs path that failed to read.
        path: PathBuf,
        /// The I/O error kind reported by the OS.
        kind: io::ErrorKind,
        /// Human-readable error message.
        message: String,
    },

    /// A sysfs file was opened but writing to it failed.
    ///
    /// For the boostpulse interface this drops the cached handle.
    #[error("error writing to {}: {message}", path.display())]
    Write {
        /// The sysfs path that failed to write.
        path: PathBuf,
        /// The I/O error kind reported by the OS.
        kind: io::ErrorKind,
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration was provided.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of what was invalid.
        reason: String,
    },
}

/// Result type alias for powerhint operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new `Open` error from the underlying I/O error.
    #[must_use]
    pub fn open(path: impl AsRef<Path>, err: &io::Error) -> Self {
        Self::Open {
            path: path.as_ref().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Create a new `Read` error from the underlying I/O error.
    #[must_use]
    pub fn read(path: impl AsRef<Path>, err: &io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Create a new `Write` error from the underlying I/O error.
    #[must_use]
    pub fn write(path: impl AsRef<Path>, err: &io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Create a new `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Check if this error happened while opening a file.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Check if this error happened while reading a file.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Check if this error happened while writing a file.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    /// Check if the OS reported missing permissions.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::PermissionDenied)
    }

    /// Get the I/O error kind for sysfs failures.
    #[must_use]
    pub const fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Open { kind, .. } | Self::Read { kind, .. } | Self::Write { kind, .. } => {
                Some(*kind)
            }
            Self::InvalidInput { .. } => None,
        }
    }

    /// Get the sysfs path involved, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::Write { path, .. } => {
                Some(path)
            }
            Self::InvalidInput { .. } => None,
        }
    }
}
