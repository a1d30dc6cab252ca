//! Translation of user-facing quality/format choices into engine options.
//!
//! [`EngineOptions`] is the single place where the tool's modes become a
//! `yt-dlp` option set. The backend renders it with [`EngineOptions::to_args`].

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::config::{
    AUDIO_FORMAT, AUDIO_QUALITY, MERGE_FORMAT, PLAYLIST_OUTPUT_TEMPLATE, Quality,
    SINGLE_OUTPUT_TEMPLATE,
};

/// What the user asked to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadMode {
    /// Video capped at a quality
    Video(Quality),
    /// Audio only, converted to MP3
    AudioOnly,
    /// An explicit engine format expression such as `137+140`
    FormatCode(String),
}

impl DownloadMode {
    /// Picks the mode from CLI choices: a format code wins, then audio-only, then quality.
    #[must_use]
    pub fn from_choices(quality: Quality, audio_only: bool, format_code: Option<&str>) -> Self {
        match format_code {
            Some(code) => Self::FormatCode(code.to_string()),
            None if audio_only => Self::AudioOnly,
            None => Self::Video(quality),
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video(quality) => write!(f, "Quality: {quality}"),
            Self::AudioOnly => write!(f, "Audio only (MP3)"),
            Self::FormatCode(code) => write!(f, "Custom format: {code}"),
        }
    }
}

/// Engine post-processing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    /// Extract the audio track and transcode it
    ExtractAudio {
        /// Target codec (`mp3`)
        codec: String,
        /// Target bitrate in kbps
        quality: String,
    },
    /// Convert the finished video into another container
    ConvertVideo {
        /// Target container (`mp4`)
        format: String,
    },
}

/// Option set handed to the media engine for one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Format selection expression
    pub format: String,
    /// Absolute output path template
    pub output_template: String,
    /// Container for merged video+audio streams
    pub merge_output_format: Option<String>,
    /// Post-processing steps, in order
    pub postprocessors: Vec<PostProcessor>,
    /// Overwrite existing files
    pub overwrites: bool,
    /// Keep going when an entry fails
    pub ignore_errors: bool,
    /// Suppress engine chatter
    pub quiet: bool,
    /// Suppress engine warnings
    pub no_warnings: bool,
    /// Embed subtitles when they are downloaded
    pub embed_subs: bool,
    /// Download uploaded subtitles
    pub write_subtitles: bool,
    /// Download automatic captions
    pub write_automatic_subs: bool,
}

impl EngineOptions {
    /// Builds the option set for `mode`, writing files into `output_dir`.
    #[must_use]
    pub fn build(mode: &DownloadMode, output_dir: &Path) -> Self {
        let mut opts = Self {
            format: String::new(),
            output_template: template_in(output_dir, SINGLE_OUTPUT_TEMPLATE),
            merge_output_format: None,
            postprocessors: Vec::new(),
            overwrites: true,
            ignore_errors: true,
            quiet: true,
            no_warnings: true,
            embed_subs: true,
            write_subtitles: false,
            write_automatic_subs: false,
        };

        match mode {
            DownloadMode::FormatCode(code) => {
                opts.format.clone_from(code);
                if code.contains('+') {
                    opts.merge_output_format = Some(MERGE_FORMAT.to_string());
                }
            }
            DownloadMode::AudioOnly => {
                opts.format = "bestaudio/best".to_string();
                opts.postprocessors.push(PostProcessor::ExtractAudio {
                    codec: AUDIO_FORMAT.to_string(),
                    quality: AUDIO_QUALITY.to_string(),
                });
            }
            DownloadMode::Video(quality) => {
                opts.format = match quality.height() {
                    Some(height) => format!(
                        "bestvideo[ext=mp4][height<={height}]+bestaudio[ext=m4a]/best[height<={height}]"
                    ),
                    None => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best".to_string(),
                };
                opts.merge_output_format = Some(MERGE_FORMAT.to_string());
                opts.postprocessors.push(PostProcessor::ConvertVideo {
                    format: MERGE_FORMAT.to_string(),
                });
            }
        }

        debug!(format = %opts.format, template = %opts.output_template, "built engine options");
        opts
    }

    /// Returns a copy that writes into `<output_dir>/<playlist>/<index> - <title>.<ext>`.
    #[must_use]
    pub fn for_playlist(&self, output_dir: &Path) -> Self {
        Self {
            output_template: template_in(output_dir, PLAYLIST_OUTPUT_TEMPLATE),
            ..self.clone()
        }
    }

    /// Renders the option set as `yt-dlp` command-line arguments (URL excluded).
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.clone(),
        ];

        if let Some(merge) = &self.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(merge.clone());
        }

        for pp in &self.postprocessors {
            match pp {
                PostProcessor::ExtractAudio { codec, quality } => {
                    args.push("--extract-audio".to_string());
                    args.push("--audio-format".to_string());
                    args.push(codec.clone());
                    args.push("--audio-quality".to_string());
                    args.push(format!("{quality}K"));
                }
                PostProcessor::ConvertVideo { format } => {
                    args.push("--recode-video".to_string());
                    args.push(format.clone());
                }
            }
        }

        let flags = [
            (self.overwrites, "--force-overwrites"),
            (self.ignore_errors, "--ignore-errors"),
            (self.quiet, "--quiet"),
            (self.no_warnings, "--no-warnings"),
            (self.embed_subs, "--embed-subs"),
            (self.write_subtitles, "--write-subs"),
            (self.write_automatic_subs, "--write-auto-subs"),
        ];
        args.extend(
            flags
                .into_iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, flag)| flag.to_string()),
        );

        args
    }
}

fn template_in(output_dir: &Path, template: &str) -> String {
    output_dir.join(template).to_string_lossy().into_owned()
}
