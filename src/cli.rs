//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use ytcli_core::Quality;

/// A minimal command-line YouTube downloader.
///
/// Downloads single videos, whole playlists, or every URL listed in a text
/// file, with quality selection, audio-only MP3 extraction, and explicit
/// format codes.
#[derive(Parser, Debug, Clone)]
#[command(name = "ytcli-dl")]
#[command(author, version, about)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// YouTube video or playlist URL
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Video quality to download: best, 144p, 240p, 360p, 480p, 720p, 1080p, 1440p, 2160p (default: best)
    #[arg(short, long, value_name = "QUALITY")]
    pub quality: Option<Quality>,

    /// Download audio only (MP3 format)
    #[arg(short, long)]
    pub audio_only: bool,

    /// Output directory for downloads (default: ~/Downloads/ytcli-downloads)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Download entire playlist
    #[arg(short, long)]
    pub playlist: bool,

    /// Download URLs from text file (one URL per line)
    #[arg(short, long, value_name = "FILE", value_parser = existing_path)]
    pub file: Option<PathBuf>,

    /// List available formats for the video without downloading
    #[arg(short, long)]
    pub list_formats: bool,

    /// Download specific format (e.g., "137+140" for 1080p video + audio)
    #[arg(long, value_name = "CODE")]
    pub format_code: Option<String>,

    /// Download playlists without asking for confirmation
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Path to the yt-dlp executable (default: yt-dlp from PATH)
    #[arg(long, value_name = "PATH")]
    pub ytdlp_path: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (--verbose for debug, twice for trace)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path '{value}' does not exist."))
    }
}

/// First line of a clap error without its `error: ` prefix.
pub fn parse_error_summary(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    #[test]
    fn test_cli_default_args_parse_successfully() {
        let args = Args::try_parse_from(["ytcli-dl", URL]).unwrap();
        assert_eq!(args.url.as_deref(), Some(URL));
        assert!(args.quality.is_none());
        assert!(!args.audio_only);
        assert!(args.output.is_none());
        assert!(!args.playlist);
        assert!(!args.yes);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_cli_no_arguments_is_not_a_parse_error() {
        let args = Args::try_parse_from(["ytcli-dl"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.file.is_none());
    }

    #[test]
    fn test_cli_quality_short_and_long() {
        let args = Args::try_parse_from(["ytcli-dl", "-q", "720p", URL]).unwrap();
        assert_eq!(args.quality, Some(Quality::P720));

        let args = Args::try_parse_from(["ytcli-dl", "--quality", "best", URL]).unwrap();
        assert_eq!(args.quality, Some(Quality::Best));
    }

    #[test]
    fn test_cli_rejects_unknown_quality() {
        let err = Args::try_parse_from(["ytcli-dl", "-q", "999p", URL]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let summary = parse_error_summary(&err);
        assert!(summary.contains("999p"), "summary: {summary}");
        assert!(!summary.starts_with("error:"));
    }

    #[test]
    fn test_cli_flags_combine() {
        let args =
            Args::try_parse_from(["ytcli-dl", "-a", "-p", "-y", "-o", "/tmp/out", URL]).unwrap();
        assert!(args.audio_only);
        assert!(args.playlist);
        assert!(args.yes);
        assert_eq!(args.output, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_cli_file_must_exist() {
        let err =
            Args::try_parse_from(["ytcli-dl", "-f", "/nonexistent/ytcli/urls.txt"]).unwrap_err();
        assert!(parse_error_summary(&err).contains("does not exist"));

        let file = NamedTempFile::new().unwrap();
        let args =
            Args::try_parse_from(["ytcli-dl", "--file", file.path().to_str().unwrap()]).unwrap();
        assert_eq!(args.file.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_cli_format_code_and_list_formats() {
        let args =
            Args::try_parse_from(["ytcli-dl", "--format-code", "137+140", "-l", URL]).unwrap();
        assert_eq!(args.format_code.as_deref(), Some("137+140"));
        assert!(args.list_formats);
    }

    #[test]
    fn test_cli_verbose_is_long_only_count() {
        let args = Args::try_parse_from(["ytcli-dl", "--verbose", "--verbose", URL]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_short_v_shows_version() {
        let err = Args::try_parse_from(["ytcli-dl", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["ytcli-dl", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["ytcli-dl", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        assert!(parse_error_summary(&err).contains("--invalid-flag"));
    }
}
