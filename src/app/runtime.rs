use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow, bail};
use tracing::{debug, info, warn};
use ytcli_core::{
    Console, DownloadMode, Downloader, DownloaderConfig, MediaBackend, TerminalConsole, YtDlp,
    list_video_formats, read_urls_from_file, validate_playlist_url, validate_url,
};

use crate::ProcessExit;
use crate::app::validation::InputSource;
use crate::app::{config_manager, exit_handler, terminal, validation};
use crate::cli::Args;

pub(crate) async fn run_downloader(args: Args) -> Result<ProcessExit> {
    let config = config_manager::resolve_config(args)?;

    let no_color = terminal::is_no_color_requested(config.no_color);
    if no_color {
        colored::control::set_override(false);
    }
    terminal::init_tracing(config.log_level, no_color);
    debug!(?config, "configuration resolved");
    info!("ytcli-dl starting");

    let backend: Arc<dyn MediaBackend> = Arc::new(YtDlp::with_program(&config.ytdlp_path));
    let interrupted = Arc::new(AtomicBool::new(false));
    let console = Arc::new(
        TerminalConsole::new(!no_color).with_interrupt_flag(Arc::clone(&interrupted)),
    );

    if config.list_formats {
        let url = validation::require_list_formats_url(config.url.as_deref())?;
        list_video_formats(backend.as_ref(), console.as_ref(), url).await;
        return Ok(ProcessExit::Success);
    }

    let input = validation::resolve_input_source(config.url.clone(), config.file.clone())?;
    validation::ensure_format_code_compatible(config.format_code.as_deref(), config.audio_only)?;

    let downloader = Downloader::new(
        DownloaderConfig::new(&config.output_dir, config.mode())
            .with_quality(config.quality)
            .with_assume_yes(config.assume_yes),
        backend,
        console.clone(),
    )
    .map_err(|e| anyhow!("Failed to initialize downloader - {e}"))?;

    console.line(&format!(
        "Output directory: {}",
        downloader.output_dir().display()
    ));
    let mode = downloader.mode();
    if matches!(mode, DownloadMode::FormatCode(_)) {
        console.line(&mode.to_string());
    } else {
        console.line(&format!("Mode: {mode}"));
    }

    let batch = matches!(input, InputSource::File(_));
    spawn_interrupt_watcher(Arc::clone(&interrupted), batch);

    let succeeded = match input {
        InputSource::File(path) => {
            run_file(&downloader, console.as_ref(), &path, &interrupted).await?
        }
        InputSource::Url(url) => run_url(&downloader, &url, config.playlist).await?,
    };

    // A batch reports its own interruption and keeps its partial results.
    let interrupted_now = !batch && interrupted.load(Ordering::SeqCst);
    if interrupted_now {
        warn!("interrupted while downloading");
    }
    let outcome = exit_handler::determine_exit_outcome(succeeded, interrupted_now)?;
    console.success("Download completed successfully!");
    Ok(outcome)
}

async fn run_file(
    downloader: &Downloader,
    console: &dyn Console,
    path: &Path,
    interrupted: &AtomicBool,
) -> Result<bool> {
    let parsed = read_urls_from_file(path)?;
    for skipped in &parsed.skipped {
        console.line(&format!(
            "Warning: Invalid URL on line {} - {}",
            skipped.line, skipped.text
        ));
    }
    if parsed.is_empty() {
        bail!("No valid URLs found in the file");
    }

    console.line(&format!("Found {} valid URLs in file.", parsed.len()));
    let report = downloader
        .download_multiple_urls(&parsed.urls(), interrupted)
        .await;
    for (url, ok) in report.iter() {
        debug!(url, ok, "batch result");
    }
    info!(
        total = report.total(),
        successful = report.successful(),
        failed = report.failed(),
        "batch finished"
    );
    Ok(report.any_succeeded())
}

async fn run_url(downloader: &Downloader, url: &str, playlist: bool) -> Result<bool> {
    if playlist || validate_playlist_url(url) {
        return Ok(downloader.download_playlist(url).await);
    }
    if !validate_url(url) {
        bail!("Invalid YouTube URL - {url}");
    }
    Ok(downloader.download_single_video(url).await)
}

/// Watches for Ctrl-C and raises `interrupted`.
///
/// Outside a batch the first signal ends the process. A batch gets to finish
/// the current URL and print its summary (a pending prompt answers no); a
/// second signal ends it.
fn spawn_interrupt_watcher(interrupted: Arc<AtomicBool>, batch: bool) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        interrupted.store(true, Ordering::SeqCst);
        if batch && tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        terminal::print_error("Download interrupted by user");
        std::process::exit(1);
    });
}
