//! Downloader for single videos, playlists, and batches of URLs.
//!
//! Every per-URL operation returns a plain `bool`: failures are reported to
//! the [`Console`] as they happen and never abort a batch.

mod batch;

pub use batch::BatchReport;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, instrument, warn};

use super::console::Console;
use super::error::DownloadError;
use crate::backend::{BackendEvent, DownloadOutcome, MediaBackend, MediaInfo};
use crate::config::Quality;
use crate::options::{DownloadMode, EngineOptions};
use crate::parser::{UrlKind, classify, validate_playlist_url, validate_url};
use crate::util::{create_output_dir, format_bytes, format_duration};

/// Width of the `=` rule around the batch summary.
const SUMMARY_RULE_WIDTH: usize = 50;

/// Settings for a [`Downloader`].
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Target directory (`~` is expanded, relative paths are made absolute)
    pub output_dir: PathBuf,
    /// What to download
    pub mode: DownloadMode,
    /// Quality the user asked for, shown on playlist progress lines
    pub quality: Quality,
    /// Skip the playlist confirmation prompt
    pub assume_yes: bool,
}

impl DownloaderConfig {
    /// Creates a config that asks before downloading playlists.
    ///
    /// The quality is taken from a video mode and is `best` otherwise.
    pub fn new(output_dir: impl Into<PathBuf>, mode: DownloadMode) -> Self {
        let quality = match &mode {
            DownloadMode::Video(quality) => *quality,
            DownloadMode::AudioOnly | DownloadMode::FormatCode(_) => Quality::Best,
        };
        Self {
            output_dir: output_dir.into(),
            mode,
            quality,
            assume_yes: false,
        }
    }

    /// Sets the quality reported when the mode itself carries none.
    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Sets whether playlist downloads start without asking.
    #[must_use]
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

/// Orchestrates downloads through a [`MediaBackend`].
pub struct Downloader {
    output_dir: PathBuf,
    mode: DownloadMode,
    quality: Quality,
    assume_yes: bool,
    options: EngineOptions,
    backend: Arc<dyn MediaBackend>,
    console: Arc<dyn Console>,
}

impl Downloader {
    /// Creates the output directory and builds engine options for the configured mode.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::OutputDir`] if the directory cannot be created.
    pub fn new(
        config: DownloaderConfig,
        backend: Arc<dyn MediaBackend>,
        console: Arc<dyn Console>,
    ) -> Result<Self, DownloadError> {
        let output_dir = create_output_dir(&config.output_dir)
            .map_err(|e| DownloadError::output_dir(&config.output_dir, e))?;
        let options = EngineOptions::build(&config.mode, &output_dir);
        info!(
            output_dir = %output_dir.display(),
            mode = %config.mode,
            backend = backend.name(),
            "Downloader ready"
        );
        Ok(Self {
            output_dir,
            mode: config.mode,
            quality: config.quality,
            assume_yes: config.assume_yes,
            options,
            backend,
            console,
        })
    }

    /// Absolute output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Configured download mode.
    #[must_use]
    pub fn mode(&self) -> &DownloadMode {
        &self.mode
    }

    /// Engine options used for single videos.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Fetches metadata, printing the failure to the console.
    async fn get_video_info(&self, url: &str) -> Option<MediaInfo> {
        match self.backend.extract_info(url).await {
            Ok(info) => Some(info),
            Err(e) => {
                debug!(url, error = %e, "info extraction failed");
                self.console
                    .line(&format!("Error: Failed to get video info - {e}"));
                None
            }
        }
    }

    /// Downloads one video. Returns true if at least one file was produced.
    #[instrument(skip(self))]
    pub async fn download_single_video(&self, url: &str) -> bool {
        if !validate_url(url) {
            self.console
                .line(&format!("Error: Invalid YouTube URL: {url}"));
            return false;
        }

        let Some(info) = self.get_video_info(url).await else {
            return false;
        };

        self.console.line(&format!(
            "Title: {}",
            info.title.as_deref().unwrap_or("Unknown Title")
        ));
        self.console.line(&format!(
            "Uploader: {}",
            info.uploader.as_deref().unwrap_or("Unknown Uploader")
        ));
        self.console
            .line(&format!("Duration: {}", format_duration(info.duration)));

        match &self.mode {
            DownloadMode::AudioOnly => self.console.line("Downloading audio only..."),
            DownloadMode::FormatCode(code) => self
                .console
                .line(&format!("Downloading with custom format: {code}...")),
            DownloadMode::Video(quality) => self
                .console
                .line(&format!("Downloading in {quality} quality...")),
        }

        let outcome = match self.run_download(url, &self.options).await {
            Ok(outcome) => outcome,
            Err(message) => {
                self.console
                    .line(&format!("Error: Download failed - {message}"));
                return false;
            }
        };

        if !outcome.has_files() {
            self.console.line("Error: No files were downloaded");
            return false;
        }
        true
    }

    /// Downloads a playlist after confirmation.
    ///
    /// A URL whose metadata has no entries is downloaded as a single video.
    #[instrument(skip(self))]
    pub async fn download_playlist(&self, url: &str) -> bool {
        if !validate_playlist_url(url) && !validate_url(url) {
            self.console
                .line(&format!("Error: Invalid playlist URL: {url}"));
            return false;
        }

        self.console.line("Getting playlist information...");
        let Some(info) = self.get_video_info(url).await else {
            return false;
        };

        if !info.is_playlist() {
            debug!(url, "no playlist entries; downloading as single video");
            return self.download_single_video(url).await;
        }

        let count = info.entry_count();
        self.console.line(&format!(
            "Playlist: {}",
            info.title.as_deref().unwrap_or("Unknown Playlist")
        ));
        self.console.line(&format!("Videos: {count}"));

        if !self.assume_yes
            && !self
                .console
                .confirm(&format!("Download all {count} videos?"))
        {
            self.console.line("Download cancelled.");
            return false;
        }

        if self.mode == DownloadMode::AudioOnly {
            self.console.line("Downloading playlist audio only...");
        } else {
            self.console.line(&format!(
                "Downloading playlist in {} quality...",
                self.quality
            ));
        }

        let playlist_options = self.options.for_playlist(&self.output_dir);
        match self.run_download(url, &playlist_options).await {
            Ok(outcome) => {
                if !outcome.has_files() {
                    warn!(url, "playlist run produced no files");
                }
                self.console.success("Playlist download completed!");
                true
            }
            Err(message) => {
                self.console
                    .line(&format!("Error: Playlist download failed - {message}"));
                false
            }
        }
    }

    /// Downloads each URL in order and prints a summary.
    ///
    /// Playlist URLs go through [`Self::download_playlist`], everything else
    /// through [`Self::download_single_video`]. When `interrupted` is raised the
    /// current URL is recorded as failed and the batch stops.
    pub async fn download_multiple_urls(
        &self,
        urls: &[String],
        interrupted: &AtomicBool,
    ) -> BatchReport {
        let total = urls.len();
        let mut report = BatchReport::new();

        self.console
            .line(&format!("Starting batch download of {total} URLs..."));

        for (index, url) in urls.iter().enumerate() {
            self.console
                .line(&format!("[{}/{total}] Processing: {url}", index + 1));

            let succeeded = match classify(url) {
                Some(UrlKind::Playlist) => self.download_playlist(url).await,
                _ => self.download_single_video(url).await,
            };

            if interrupted.load(Ordering::SeqCst) {
                self.console.line("Error: Download interrupted by user.");
                report.record(url, false);
                break;
            }
            report.record(url, succeeded);
        }

        self.print_summary(&report);
        report
    }

    /// Lists formats for a single video URL.
    pub async fn list_formats(&self, url: &str) -> bool {
        if !validate_url(url) {
            self.console
                .line(&format!("Error: Invalid YouTube URL: {url}"));
            return false;
        }
        list_video_formats(self.backend.as_ref(), self.console.as_ref(), url).await
    }

    fn print_summary(&self, report: &BatchReport) {
        let rule = "=".repeat(SUMMARY_RULE_WIDTH);
        self.console.line(&rule);
        self.console.line("Batch Download Summary:");
        self.console
            .line(&format!("Total URLs: {}", report.total()));
        self.console
            .success(&format!("Successful: {}", report.successful()));
        if report.failed() > 0 {
            self.console.line(&format!("Failed: {}", report.failed()));
        }
        self.console.line(&rule);
    }

    /// Runs the engine, echoing ` - <file>` for every finished file.
    ///
    /// Returns the engine outcome, or the engine's error message.
    async fn run_download(
        &self,
        url: &str,
        options: &EngineOptions,
    ) -> Result<DownloadOutcome, String> {
        let console = Arc::clone(&self.console);
        let mut on_event = move |event: BackendEvent| match event {
            BackendEvent::Progress(percent) => console.progress(percent),
            BackendEvent::Finished(path) => {
                console.finish_progress();
                let name = path
                    .file_name()
                    .map_or_else(|| "file".into(), |n| n.to_string_lossy());
                console.line(&format!(" - {name}"));
                let size = std::fs::metadata(&path).ok().map(|m| m.len());
                debug!(path = %path.display(), size = %format_bytes(size), "file finished");
            }
        };

        let result = self.backend.download(url, options, &mut on_event).await;
        self.console.finish_progress();

        match result {
            Ok(outcome) => {
                info!(
                    url,
                    files = outcome.files.len(),
                    exit_code = ?outcome.exit_code,
                    "engine run finished"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(url, error = %e, "engine run failed");
                Err(e.to_string())
            }
        }
    }
}

/// Prints the engine's format table for `url` without validating it.
///
/// Returns false (after printing the error) if the engine fails.
pub async fn list_video_formats(
    backend: &dyn MediaBackend,
    console: &dyn Console,
    url: &str,
) -> bool {
    match backend.list_formats(url).await {
        Ok(()) => true,
        Err(e) => {
            console.line(&format!("Error: Failed to list formats - {e}"));
            false
        }
    }
}
