//! Download orchestration over the media engine.
//!
//! This module runs single-video, playlist, and batch downloads on top of a
//! [`MediaBackend`](crate::backend::MediaBackend), reporting to the user through
//! a [`Console`].
//!
//! # Features
//!
//! - URL validation before any engine call
//! - Metadata preview (title, uploader, duration) for single videos
//! - Playlist confirmation prompt and per-playlist output folders
//! - Batch runs with per-URL success/failure bookkeeping and a summary block
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ytcli_core::download::{Downloader, DownloaderConfig, TerminalConsole};
//! use ytcli_core::{DownloadMode, Quality, YtDlp};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = Downloader::new(
//!     DownloaderConfig::new("./videos", DownloadMode::Video(Quality::P720)),
//!     Arc::new(YtDlp::new()),
//!     Arc::new(TerminalConsole::new(true)),
//! )?;
//! let ok = downloader
//!     .download_single_video("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!     .await;
//! println!("succeeded: {ok}");
//! # Ok(())
//! # }
//! ```

mod console;
mod engine;
mod error;

pub use console::{Console, TerminalConsole};
pub use engine::{BatchReport, Downloader, DownloaderConfig, list_video_formats};
pub use error::DownloadError;
