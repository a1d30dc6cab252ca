//! Quality table and engine constants.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Program name used in help hints and the config directory.
pub const APP_NAME: &str = "ytcli-dl";

/// Audio codec produced by audio-only downloads.
pub const AUDIO_FORMAT: &str = "mp3";

/// Audio bitrate (kbps) requested from the audio extractor.
pub const AUDIO_QUALITY: &str = "192";

/// Container used when separate video and audio streams are merged.
pub const MERGE_FORMAT: &str = "mp4";

/// Output filename template for single videos, relative to the output directory.
pub const SINGLE_OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Output filename template for playlist entries, relative to the output directory.
pub const PLAYLIST_OUTPUT_TEMPLATE: &str = "%(playlist)s/%(playlist_index)s - %(title)s.%(ext)s";

/// Returns the default download folder: `~/Downloads/ytcli-downloads`.
///
/// Falls back to the current directory when no home directory is known.
#[must_use]
pub fn default_download_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Downloads")
        .join("ytcli-downloads")
}

/// Video quality choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Best available quality
    #[default]
    Best,
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

impl Quality {
    /// All qualities in display order.
    pub const ALL: [Quality; 9] = [
        Quality::Best,
        Quality::P144,
        Quality::P240,
        Quality::P360,
        Quality::P480,
        Quality::P720,
        Quality::P1080,
        Quality::P1440,
        Quality::P2160,
    ];

    /// Returns the stable label (`best`, `720p`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::P144 => "144p",
            Self::P240 => "240p",
            Self::P360 => "360p",
            Self::P480 => "480p",
            Self::P720 => "720p",
            Self::P1080 => "1080p",
            Self::P1440 => "1440p",
            Self::P2160 => "2160p",
        }
    }

    /// Maximum video height in pixels, or `None` for `best`.
    #[must_use]
    pub fn height(self) -> Option<u32> {
        match self {
            Self::Best => None,
            Self::P144 => Some(144),
            Self::P240 => Some(240),
            Self::P360 => Some(360),
            Self::P480 => Some(480),
            Self::P720 => Some(720),
            Self::P1080 => Some(1080),
            Self::P1440 => Some(1440),
            Self::P2160 => Some(2160),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|quality| quality.as_str() == value)
            .ok_or_else(|| {
                let choices = Self::ALL
                    .iter()
                    .map(|quality| format!("'{quality}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("'{value}' is not one of {choices}")
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_labels_round_trip_through_from_str() {
        for quality in Quality::ALL {
            assert_eq!(quality.as_str().parse::<Quality>().unwrap(), quality);
        }
    }

    #[test]
    fn test_quality_from_str_rejects_unknown_label() {
        let err = "4k".parse::<Quality>().unwrap_err();
        assert!(err.contains("'4k'"));
        assert!(err.contains("'1080p'"));
    }

    #[test]
    fn test_quality_height_best_is_none() {
        assert_eq!(Quality::Best.height(), None);
        assert_eq!(Quality::P720.height(), Some(720));
    }

    #[test]
    fn test_default_download_dir_ends_with_ytcli_downloads() {
        let dir = default_download_dir();
        assert!(dir.ends_with("Downloads/ytcli-downloads"));
    }
}
