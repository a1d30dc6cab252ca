//! Seam to the external media engine.
//!
//! All extraction, transport, and conversion happen inside the engine; this
//! module only defines what the orchestration layer asks of it.
//!
//! # Architecture
//!
//! - [`MediaBackend`] - Async trait the downloader drives
//! - [`YtDlp`] - Implementation that runs the `yt-dlp` executable
//! - [`MediaInfo`] - Metadata decoded from the engine's JSON dump
//! - [`BackendEvent`] - Progress and finished-file notifications

mod error;
mod ytdlp;

pub use error::BackendError;
pub use ytdlp::{YtDlp, parse_event};

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::options::EngineOptions;

/// Metadata for a video or playlist, fetched without downloading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    /// Video or playlist title
    #[serde(default)]
    pub title: Option<String>,
    /// Channel or uploader name
    #[serde(default)]
    pub uploader: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Playlist entries; absent for single videos. Unavailable entries are `null`.
    #[serde(default)]
    pub entries: Option<Vec<Option<serde_json::Value>>>,
}

impl MediaInfo {
    /// Returns true when the engine reported playlist entries.
    #[must_use]
    pub fn is_playlist(&self) -> bool {
        self.entries.is_some()
    }

    /// Number of available (non-null) entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| entries.iter().filter(|e| e.is_some()).count())
    }
}

/// Notification emitted by the engine during a download.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// Download progress of the current file, 0.0 to 100.0
    Progress(f64),
    /// A file reached its final location
    Finished(PathBuf),
}

/// Result of a download run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Files that reached their final location, in completion order
    pub files: Vec<PathBuf>,
    /// Engine exit code (`None` when killed by a signal)
    pub exit_code: Option<i32>,
}

impl DownloadOutcome {
    /// Returns true if at least one file was produced.
    #[must_use]
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Operations the downloader needs from the media engine.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via `Arc<dyn MediaBackend>`.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Returns the backend's name (e.g., "yt-dlp").
    fn name(&self) -> &str;

    /// Fetches metadata for `url` without downloading.
    async fn extract_info(&self, url: &str) -> Result<MediaInfo, BackendError>;

    /// Downloads `url` with `options`, reporting events as they happen.
    async fn download(
        &self,
        url: &str,
        options: &EngineOptions,
        on_event: &mut (dyn FnMut(BackendEvent) + Send),
    ) -> Result<DownloadOutcome, BackendError>;

    /// Prints the engine's format table for `url` to the terminal.
    async fn list_formats(&self, url: &str) -> Result<(), BackendError>;
}
