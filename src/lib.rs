//! ytcli Core Library
//!
//! This library provides the orchestration layer behind the `ytcli-dl`
//! command-line tool: it classifies YouTube URLs, translates quality and
//! format choices into options for the external `yt-dlp` engine, and runs
//! single, playlist, and batch downloads with per-URL bookkeeping.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Quality table and engine constants
//! - [`parser`] - URL classification and URL-list file reading
//! - [`options`] - Translation of user choices into engine options
//! - [`backend`] - The `yt-dlp` process seam
//! - [`download`] - Single/playlist/batch orchestration and console output
//! - [`util`] - Duration/size formatting and output directory handling

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod download;
pub mod options;
pub mod parser;
#[cfg(test)]
pub mod test_support;
pub mod util;

// Re-export commonly used types
pub use backend::{BackendError, BackendEvent, DownloadOutcome, MediaBackend, MediaInfo, YtDlp};
pub use config::{APP_NAME, Quality, default_download_dir};
pub use download::{
    BatchReport, Console, DownloadError, Downloader, DownloaderConfig, TerminalConsole,
    list_video_formats,
};
pub use options::{DownloadMode, EngineOptions, PostProcessor};
pub use parser::{ParseError, ParseResult, ParsedUrl, UrlKind, classify, read_urls_from_file};
pub use parser::{validate_playlist_url, validate_url};
pub use util::{create_output_dir, format_bytes, format_duration};
