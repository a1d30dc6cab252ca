//! Configuration lifecycle: load file config and merge CLI overrides.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;
use ytcli_core::{DownloadMode, Quality, default_download_dir};

use crate::app_config::{FileConfig, load_default_file_config};
use crate::cli::Args;

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_YTDLP_PROGRAM: &str = "yt-dlp";

/// Settings for one run after CLI flags, config file, and defaults are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedConfig {
    pub(crate) url: Option<String>,
    pub(crate) file: Option<PathBuf>,
    pub(crate) output_dir: PathBuf,
    pub(crate) quality: Quality,
    pub(crate) audio_only: bool,
    pub(crate) format_code: Option<String>,
    pub(crate) playlist: bool,
    pub(crate) list_formats: bool,
    pub(crate) assume_yes: bool,
    pub(crate) ytdlp_path: PathBuf,
    pub(crate) no_color: bool,
    pub(crate) log_level: &'static str,
}

impl ResolvedConfig {
    pub(crate) fn mode(&self) -> DownloadMode {
        DownloadMode::from_choices(self.quality, self.audio_only, self.format_code.as_deref())
    }
}

/// Loads the default config file (if any) and merges `args` over it.
pub(crate) fn resolve_config(args: Args) -> Result<ResolvedConfig> {
    let loaded = load_default_file_config()?;
    if let Some(path) = loaded.path.as_deref() {
        debug!(path = %path.display(), loaded = loaded.config.is_some(), "config file");
    }
    Ok(apply_config_defaults(args, loaded.config.as_ref()))
}

/// CLI values win; file values fill the gaps; built-in defaults cover the rest.
pub(crate) fn apply_config_defaults(
    args: Args,
    file_config: Option<&FileConfig>,
) -> ResolvedConfig {
    let file_config = file_config.cloned().unwrap_or_default();

    let output_dir = args
        .output
        .or(file_config.output_dir)
        .unwrap_or_else(default_download_dir);
    let quality = args.quality.or(file_config.quality).unwrap_or_default();
    // A CLI format code ignores the file's audio_only default.
    let audio_only = args.audio_only
        || (args.format_code.is_none() && file_config.audio_only.unwrap_or(false));
    let assume_yes = args.yes || file_config.assume_yes.unwrap_or(false);
    let ytdlp_path = args
        .ytdlp_path
        .or(file_config.ytdlp_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_YTDLP_PROGRAM));
    let log_level = resolve_default_log_level(args.verbose, file_config.verbosity);

    ResolvedConfig {
        url: args.url,
        file: args.file,
        output_dir,
        quality,
        audio_only,
        format_code: args.format_code,
        playlist: args.playlist,
        list_formats: args.list_formats,
        assume_yes,
        ytdlp_path,
        no_color: args.no_color,
        log_level,
    }
}

/// `--verbose` beats config `verbosity`, which beats `warn`.
pub(crate) fn resolve_default_log_level(
    verbose: u8,
    verbosity: Option<crate::app_config::VerbositySetting>,
) -> &'static str {
    match verbose {
        0 => verbosity.map_or(DEFAULT_LOG_LEVEL, |setting| setting.log_level()),
        1 => "debug",
        _ => "trace",
    }
}
