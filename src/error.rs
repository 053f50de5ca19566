use std::error::Error as StdError;
use std::io;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LsError {
    // Resolution
    #[error("cannot access '{}': No such file or directory", .path.display())]
    TargetNotFound { path: PathBuf },

    // Enumeration
    #[error("cannot access '{}': {message}", .path.display())]
    DirectoryAccess { path: PathBuf, message: String },

    // Per-entry
    #[error("cannot access '{}': {message}", .path.display())]
    EntryMetadata { path: PathBuf, message: String },

    // Runtime
    #[error("failed to write listing")]
    Output(#[source] io::Error),
}

impl LsError {
    /// Build a [`LsError::DirectoryAccess`] from an OS error.
    pub fn directory_access(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::DirectoryAccess {
            path:    path.into(),
            message: describe_io(err),
        }
    }

    /// Build a [`LsError::EntryMetadata`] from an OS error.
    pub fn entry_metadata(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::EntryMetadata {
            path:    path.into(),
            message: describe_io(err),
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::TargetNotFound { path }
            | Self::DirectoryAccess { path, .. }
            | Self::EntryMetadata { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the listing can continue after this error.
    ///
    /// Everything except a failed write to the output is localized to one
    /// target or one entry. A broken output stream ends the run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Output(_))
    }

    /// The `ls: ...` line written to the diagnostic stream. An output
    /// failure carries its underlying cause.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Output(cause) => format!("ls: {self}: {cause}"),
            _ => format!("ls: {self}"),
        }
    }
}

/// `strerror`-style text for an I/O error: `Permission denied` rather than
/// `Permission denied (os error 13)`.
///
/// Walkers wrap the OS error in their own error types, so the cause chain
/// is searched for the first errno.
pub fn describe_io(err: &io::Error) -> String {
    match os_error_code(err) {
        Some(code) => Errno::from_raw(code).desc().to_string(),
        None       => err.to_string(),
    }
}

fn os_error_code(err: &io::Error) -> Option<i32> {
    if let Some(code) = err.raw_os_error() {
        return Some(code);
    }

    let mut cause: Option<&(dyn StdError + 'static)> = err.get_ref().map(|e| e as &(dyn StdError + 'static));
    while let Some(e) = cause {
        if let Some(code) = e.downcast_ref::<io::Error>().and_then(io::Error::raw_os_error) {
            return Some(code);
        }
        cause = e.source();
    }
    None
}
