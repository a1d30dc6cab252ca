//! YouTube URL classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Pattern for single-video URLs. Matched at the start of the input only.
#[allow(clippy::expect_used)]
static VIDEO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(https?://)?(www\.)?(youtube|youtu|youtube-nocookie)\.(com|be)/(watch\?v=|embed/|v/|.+\?v=)?([^&=%\?]{11})",
    )
    .expect("video URL regex is valid") // Static pattern, safe to panic
});

/// Pattern for playlist URLs. Matched at the start of the input only.
#[allow(clippy::expect_used)]
static PLAYLIST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?youtube\.com/playlist\?list=([a-zA-Z0-9_-]+)")
        .expect("playlist URL regex is valid") // Static pattern, safe to panic
});

/// What a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// A single video
    Video,
    /// A playlist of videos
    Playlist,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Playlist => write!(f, "playlist"),
        }
    }
}

/// Returns true if `url` looks like a YouTube video URL.
///
/// Only the start of the string has to match, so query parameters after the
/// 11-character video id are accepted.
///
/// ```
/// use ytcli_core::parser::validate_url;
///
/// assert!(validate_url("https://youtu.be/dQw4w9WgXcQ"));
/// assert!(!validate_url("https://vimeo.com/12345678901"));
/// ```
#[must_use]
pub fn validate_url(url: &str) -> bool {
    VIDEO_PATTERN.is_match(url)
}

/// Returns true if `url` is a `youtube.com/playlist?list=` URL.
#[must_use]
pub fn validate_playlist_url(url: &str) -> bool {
    PLAYLIST_PATTERN.is_match(url)
}

/// Classifies a URL, giving playlist URLs precedence over video URLs.
#[must_use]
pub fn classify(url: &str) -> Option<UrlKind> {
    let kind = if validate_playlist_url(url) {
        Some(UrlKind::Playlist)
    } else if validate_url(url) {
        Some(UrlKind::Video)
    } else {
        None
    };
    trace!(url, ?kind, "classified URL");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Video URLs ====================

    #[test]
    fn test_validate_url_accepts_watch_url() {
        assert!(validate_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn test_validate_url_accepts_short_url() {
        assert!(validate_url("https://youtu.be/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_validate_url_accepts_missing_scheme_and_www() {
        assert!(validate_url("youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn test_validate_url_accepts_embed_and_v_paths() {
        assert!(validate_url("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(validate_url("https://www.youtube.com/v/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_validate_url_accepts_nocookie_domain() {
        assert!(validate_url(
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ"
        ));
    }

    #[test]
    fn test_validate_url_accepts_trailing_parameters() {
        assert!(validate_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"
        ));
    }

    #[test]
    fn test_validate_url_rejects_other_hosts() {
        assert!(!validate_url("https://vimeo.com/watch?v=dQw4w9WgXcQ"));
        assert!(!validate_url("https://example.com/file.mp4"));
    }

    #[test]
    fn test_validate_url_rejects_short_id() {
        assert!(!validate_url("https://youtu.be/abc"));
    }

    #[test]
    fn test_validate_url_requires_match_at_start() {
        assert!(!validate_url("see https://youtu.be/dQw4w9WgXcQ"));
    }

    // ==================== Playlist URLs ====================

    #[test]
    fn test_validate_playlist_url_accepts_playlist() {
        assert!(validate_playlist_url(
            "https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf"
        ));
        assert!(validate_playlist_url("youtube.com/playlist?list=PL-abc_123"));
    }

    #[test]
    fn test_validate_playlist_url_rejects_watch_url() {
        assert!(!validate_playlist_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123"
        ));
    }

    #[test]
    fn test_validate_playlist_url_rejects_short_domain() {
        assert!(!validate_playlist_url("https://youtu.be/playlist?list=PL123"));
    }

    // ==================== Classification ====================

    #[test]
    fn test_classify_playlist() {
        let url = "https://www.youtube.com/playlist?list=PL123456789";
        assert!(!validate_url(url));
        assert_eq!(classify(url), Some(UrlKind::Playlist));
    }

    #[test]
    fn test_classify_watch_url_with_list_is_video() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123"),
            Some(UrlKind::Video)
        );
    }

    #[test]
    fn test_classify_video() {
        assert_eq!(
            classify("https://youtu.be/dQw4w9WgXcQ"),
            Some(UrlKind::Video)
        );
    }

    #[test]
    fn test_classify_unknown_is_none() {
        assert_eq!(classify("not a url"), None);
    }

    #[test]
    fn test_url_kind_display() {
        assert_eq!(UrlKind::Video.to_string(), "video");
        assert_eq!(UrlKind::Playlist.to_string(), "playlist");
    }
}
