//! Input parsing module for classifying YouTube URLs and reading URL lists.
//!
//! # Current Support
//!
//! - Single video URLs (`watch?v=`, `youtu.be/`, `embed/`, `v/`, nocookie)
//! - Playlist URLs (`youtube.com/playlist?list=...`)
//! - URL list files (one URL per line, `#` comments)
//!
//! # Example
//!
//! ```
//! use ytcli_core::parser::{UrlKind, classify};
//!
//! let kind = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//! assert_eq!(kind, Some(UrlKind::Video));
//! ```

mod error;
mod input;
mod url;

pub use error::ParseError;
pub use input::{ParseResult, ParsedUrl, SkippedLine, read_urls_from_file};
pub use url::{UrlKind, classify, validate_playlist_url, validate_url};
