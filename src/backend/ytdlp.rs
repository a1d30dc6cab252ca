//! `yt-dlp` child-process backend.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, instrument, trace, warn};

use super::{BackendError, BackendEvent, DownloadOutcome, MediaBackend, MediaInfo};
use crate::options::EngineOptions;

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "yt-dlp";

const PROGRESS_PREFIX: &str = "ytcli-progress:";
const FILE_PREFIX: &str = "ytcli-file:";

/// Number of stderr lines kept for error reporting.
const STDERR_TAIL_LINES: usize = 20;

/// Backend that shells out to the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    /// Creates a backend using `yt-dlp` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Creates a backend using a specific executable.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the executable this backend runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.kill_on_drop(true);
        cmd
    }

    /// Full argument list for a download of `url`.
    #[must_use]
    pub fn download_args(url: &str, options: &EngineOptions) -> Vec<String> {
        let mut args = options.to_args();
        args.extend([
            "--newline".to_string(),
            "--progress".to_string(),
            "--progress-template".to_string(),
            format!("download:{PROGRESS_PREFIX}%(progress._percent_str)s"),
            "--print".to_string(),
            format!("after_move:{FILE_PREFIX}%(filepath)s"),
            "--no-simulate".to_string(),
            "--".to_string(),
            url.to_string(),
        ]);
        args
    }
}

/// Parses one line of engine output into an event, if it is one.
///
/// ```
/// use std::path::PathBuf;
/// use ytcli_core::backend::parse_event;
/// use ytcli_core::BackendEvent;
///
/// assert_eq!(
///     parse_event("ytcli-file:/tmp/a.mp4"),
///     Some(BackendEvent::Finished(PathBuf::from("/tmp/a.mp4")))
/// );
/// assert_eq!(parse_event("ytcli-progress:  42.5%"), Some(BackendEvent::Progress(42.5)));
/// assert_eq!(parse_event("[youtube] Extracting URL"), None);
/// ```
#[must_use]
pub fn parse_event(line: &str) -> Option<BackendEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(path) = line.strip_prefix(FILE_PREFIX) {
        let path = path.trim();
        if path.is_empty() || path == "NA" {
            return None;
        }
        return Some(BackendEvent::Finished(PathBuf::from(path)));
    }
    if let Some(percent) = line.strip_prefix(PROGRESS_PREFIX) {
        return percent
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .map(|value| BackendEvent::Progress(value.clamp(0.0, 100.0)));
    }
    None
}

#[async_trait]
impl MediaBackend for YtDlp {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    #[instrument(skip(self), fields(program = %self.program.display()))]
    async fn extract_info(&self, url: &str) -> Result<MediaInfo, BackendError> {
        let output = self
            .command()
            .args([
                "--dump-single-json",
                "--flat-playlist",
                "--no-warnings",
                "--",
                url,
            ])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| BackendError::spawn(self.program_name(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::failed(url, output.status.code(), &stderr));
        }

        let info: MediaInfo =
            serde_json::from_slice(&output.stdout).map_err(|source| BackendError::InvalidOutput {
                url: url.to_string(),
                source,
            })?;
        debug!(
            title = ?info.title,
            entries = info.entry_count(),
            "extracted media info"
        );
        Ok(info)
    }

    #[instrument(skip(self, options, on_event), fields(program = %self.program.display()))]
    async fn download(
        &self,
        url: &str,
        options: &EngineOptions,
        on_event: &mut (dyn FnMut(BackendEvent) + Send),
    ) -> Result<DownloadOutcome, BackendError> {
        let args = Self::download_args(url, options);
        debug!(args = ?args, "starting download");

        let mut child = self
            .command()
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackendError::spawn(self.program_name(), e))?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(BackendError::Io {
                source: std::io::Error::other("engine pipes unavailable"),
            });
        };
        let mut stdout = BufReader::new(stdout);
        let mut stderr = BufReader::new(stderr);
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;

        let mut files = Vec::new();
        let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);

        // read_until keeps partial lines in the buffer when the other branch wins.
        while stdout_open || stderr_open {
            tokio::select! {
                read = stdout.read_until(b'\n', &mut stdout_buf), if stdout_open => {
                    if read? == 0 {
                        stdout_open = false;
                        continue;
                    }
                    let line = decode_line(&stdout_buf);
                    stdout_buf.clear();
                    match parse_event(&line) {
                        Some(event) => dispatch(event, &mut files, on_event),
                        None => trace!(line = %line, "engine stdout"),
                    }
                }
                read = stderr.read_until(b'\n', &mut stderr_buf), if stderr_open => {
                    if read? == 0 {
                        stderr_open = false;
                        continue;
                    }
                    let line = decode_line(&stderr_buf);
                    stderr_buf.clear();
                    match parse_event(&line) {
                        Some(event) => dispatch(event, &mut files, on_event),
                        None => {
                            trace!(line = %line, "engine stderr");
                            if stderr_tail.len() == STDERR_TAIL_LINES {
                                stderr_tail.pop_front();
                            }
                            stderr_tail.push_back(line);
                        }
                    }
                }
            }
        }

        let status = child.wait().await?;
        let exit_code = status.code();

        if !status.success() {
            if files.is_empty() {
                let stderr = Vec::from(stderr_tail).join("\n");
                return Err(BackendError::failed(url, exit_code, &stderr));
            }
            warn!(
                ?exit_code,
                files = files.len(),
                "engine reported errors but produced files"
            );
        }

        Ok(DownloadOutcome { files, exit_code })
    }

    #[instrument(skip(self), fields(program = %self.program.display()))]
    async fn list_formats(&self, url: &str) -> Result<(), BackendError> {
        let status = self
            .command()
            .args(["--list-formats", "--", url])
            .status()
            .await
            .map_err(|e| BackendError::spawn(self.program_name(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(BackendError::failed(url, status.code(), ""))
        }
    }
}

/// Decodes one raw output line. Bytes that are not UTF-8 are replaced.
fn decode_line(raw: &[u8]) -> String {
    let line = String::from_utf8_lossy(raw);
    if matches!(line, std::borrow::Cow::Owned(_)) {
        trace!("engine output line was not valid UTF-8");
    }
    line.trim_end_matches(['\r', '\n']).to_string()
}

fn dispatch(
    event: BackendEvent,
    files: &mut Vec<PathBuf>,
    on_event: &mut (dyn FnMut(BackendEvent) + Send),
) {
    if let BackendEvent::Finished(path) = &event {
        files.push(path.clone());
    }
    on_event(event);
}
