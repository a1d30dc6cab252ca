//! Integration tests for the parser module.
//!
//! These tests verify URL classification and URL-list files with realistic
//! inputs through the public API.

use std::io::Write;

use tempfile::NamedTempFile;
use ytcli_core::{ParseError, UrlKind, classify, read_urls_from_file, validate_url};

/// Test reading a realistic URL list with comments, blanks, and junk.
#[test]
fn test_read_realistic_url_list() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "# Music to download\n\
         https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\
         \n\
         youtu.be/9bZkp7q19f0\n\
         https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf\n\
         \x20\x20# indented comment\n\
         https://vimeo.com/123456\n\
         https://www.youtube.com/embed/kJQP7kiw5Fk\n"
    )
    .unwrap();

    let result = read_urls_from_file(file.path()).unwrap();

    assert_eq!(result.len(), 4, "Should accept exactly 4 URLs");
    assert_eq!(result.skipped_count(), 1, "Vimeo line should be skipped");
    assert_eq!(result.skipped[0].line, 7);
    assert_eq!(result.items[2].kind, UrlKind::Playlist);
    assert_eq!(result.items[1].url, "youtu.be/9bZkp7q19f0");
    assert_eq!(
        result.urls(),
        vec![
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            "youtu.be/9bZkp7q19f0".to_string(),
            "https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf".to_string(),
            "https://www.youtube.com/embed/kJQP7kiw5Fk".to_string(),
        ]
    );
}

/// Test that a Windows-style file with CRLF endings is handled.
#[test]
fn test_read_crlf_url_list() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"https://youtu.be/dQw4w9WgXcQ\r\nhttps://youtu.be/9bZkp7q19f0\r\n")
        .unwrap();

    let result = read_urls_from_file(file.path()).unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.skipped.is_empty());
}

/// Test that a missing file produces the user-facing message.
#[test]
fn test_read_missing_file_reports_path() {
    let err = read_urls_from_file("/nonexistent/ytcli/urls.txt").unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "File '/nonexistent/ytcli/urls.txt' not found"
    );
}

/// Test URL shapes users commonly paste.
#[test]
fn test_classify_common_url_shapes() {
    let videos = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "http://youtube.com/watch?v=dQw4w9WgXcQ&t=42",
        "www.youtube.com/v/dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ",
        "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
    ];
    for url in videos {
        assert_eq!(classify(url), Some(UrlKind::Video), "{url}");
    }

    assert_eq!(
        classify("https://www.youtube.com/playlist?list=PL-abc_123"),
        Some(UrlKind::Playlist)
    );
    assert_eq!(classify("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    assert!(!validate_url("https://youtu.be/short"));
}
