//! Types representing parsed URL-list input, and the file reader that builds them.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::error::ParseError;
use super::url::{UrlKind, classify};

/// A URL accepted from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// 1-based line number in the source file
    pub line: usize,
    /// The URL text (trimmed)
    pub url: String,
    /// Detected kind
    pub kind: UrlKind,
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.url)
    }
}

/// A non-comment line that was not a recognizable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source file
    pub line: usize,
    /// The offending text (trimmed)
    pub text: String,
}

/// Collection of parsed URLs from input.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Successfully parsed URLs, in file order
    pub items: Vec<ParsedUrl>,
    /// Lines that could not be parsed (for warnings)
    pub skipped: Vec<SkippedLine>,
}

impl ParseResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses URL-list text: one URL per line, blank lines and `#` comments ignored.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut result = Self::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match classify(trimmed) {
                Some(kind) => result.items.push(ParsedUrl {
                    line,
                    url: trimmed.to_string(),
                    kind,
                }),
                None => {
                    debug!(line, text = trimmed, "skipping unrecognized line");
                    result.skipped.push(SkippedLine {
                        line,
                        text: trimmed.to_string(),
                    });
                }
            }
        }
        result
    }

    /// Returns true if no URLs were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns count of parsed URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns count of skipped lines.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Returns the URL strings in file order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.items.iter().map(|item| item.url.clone()).collect()
    }
}

/// Reads a URL list file.
///
/// # Errors
///
/// Returns [`ParseError::FileNotFound`] when the file is missing and
/// [`ParseError::Read`] for any other IO or encoding failure.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_urls_from_file(path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ParseError::from_io(path, e))?;
    let result = ParseResult::from_text(&text);
    info!(
        urls = result.len(),
        skipped = result.skipped_count(),
        "Read URL list"
    );
    Ok(result)
}
