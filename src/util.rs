//! Display formatting and output directory helpers.

use std::io;
use std::path::{Path, PathBuf};

/// Formats a duration in seconds as `MM:SS`, or `HH:MM:SS` once it reaches an hour.
///
/// ```
/// use ytcli_core::format_duration;
///
/// assert_eq!(format_duration(Some(212.0)), "03:32");
/// assert_eq!(format_duration(Some(3725.0)), "01:02:05");
/// assert_eq!(format_duration(None), "Unknown duration");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return "Unknown duration".to_string();
    };
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Formats a byte count with one decimal in B, KB, MB, GB, or TB.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "Unknown size".to_string();
    };
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Expands a leading `~` to the user's home directory.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Expands `~`, makes `path` absolute, and creates it with parents.
///
/// Returns the absolute directory path.
///
/// # Errors
///
/// Returns an IO error if the current directory cannot be determined or the
/// directory cannot be created.
pub fn create_output_dir(path: &Path) -> io::Result<PathBuf> {
    let expanded = expand_home(path);
    let absolute = std::path::absolute(&expanded)?;
    std::fs::create_dir_all(&absolute)?;
    Ok(absolute)
}
