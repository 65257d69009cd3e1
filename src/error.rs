//! Error types for the directory walker.
//!
//! The walker reports typed errors so callers can tell a missing root from an
//! unreadable one. The command layer wraps these in `anyhow` with context.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while validating or traversing a root path.
#[derive(Error, Debug)]
pub enum WalkError {
    /// The root path (or an entry that vanished mid-walk) does not exist.
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but cannot be listed or written.
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The root path exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// A symlink cycle was detected while following links.
    #[error("filesystem loop at {}", path.display())]
    Loop { path: PathBuf },

    /// Any other I/O failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// Classifies an I/O error that occurred at `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// The `io::ErrorKind` class of this error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::NotFound { .. } => io::ErrorKind::NotFound,
            Self::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
            Self::NotADirectory { .. } => io::ErrorKind::NotADirectory,
            Self::Loop { .. } => io::ErrorKind::Other,
            Self::Io { source, .. } => source.kind(),
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::PermissionDenied { path } | Self::NotADirectory { path } | Self::Loop { path } | Self::Io { path, .. } => path,
        }
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(std::path::Path::to_path_buf).unwrap_or_default();

        if let Some(ancestor) = err.loop_ancestor() {
            tracing::debug!(ancestor = %ancestor.display(), "symlink loop");
            return Self::Loop { path };
        }

        match err.into_io_error() {
            Some(source) => Self::from_io(path, source),
            None => Self::Io { path, source: io::Error::other("walk failed") },
        }
    }
}
