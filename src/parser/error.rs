//! Error types for input parsing operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a URL list file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The URL list file does not exist
    #[error("File '{}' not found", path.display())]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The URL list file exists but could not be read
    #[error("Failed to read file '{}' - {source}", path.display())]
    Read {
        /// Path that failed to read
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Maps an IO error on `path` to the matching variant.
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Read { path, source }
        }
    }
}
