//! Error types for the download module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up a downloader.
///
/// Per-URL failures are not errors at this level: they are reported to the
/// console and recorded as `false` outcomes.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The output directory could not be resolved or created
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        /// The directory that was requested
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an output directory error.
    pub fn output_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_error_message() {
        let err = DownloadError::output_dir(
            "/root/locked",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/root/locked"), "should contain path");
        assert!(msg.contains("permission denied"), "should contain reason");
    }
}
