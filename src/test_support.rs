//! Scripted backend and recording console for unit tests.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{BackendError, BackendEvent, DownloadOutcome, MediaBackend, MediaInfo};
use crate::download::Console;
use crate::options::EngineOptions;

/// Backend returning canned metadata and pretending to download.
#[derive(Default)]
pub struct MockBackend {
    info: Option<MediaInfo>,
    info_error: Option<String>,
    download_error: Option<String>,
    formats_error: Option<String>,
    no_files: bool,
    info_calls: Mutex<usize>,
    download_calls: Mutex<Vec<(String, EngineOptions)>>,
    format_calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self, info: MediaInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_video(self, title: &str, uploader: &str, duration: f64) -> Self {
        self.with_info(MediaInfo {
            title: Some(title.to_string()),
            uploader: Some(uploader.to_string()),
            duration: Some(duration),
            entries: None,
        })
    }

    /// Playlist with `available` entries followed by `unavailable` null entries.
    pub fn with_playlist(self, title: &str, available: usize, unavailable: usize) -> Self {
        let mut entries: Vec<Option<serde_json::Value>> = (0..available)
            .map(|i| Some(serde_json::json!({ "id": format!("video{i}") })))
            .collect();
        entries.extend(std::iter::repeat_n(None, unavailable));
        self.with_info(MediaInfo {
            title: Some(title.to_string()),
            uploader: None,
            duration: None,
            entries: Some(entries),
        })
    }

    pub fn failing_info(mut self, message: &str) -> Self {
        self.info_error = Some(message.to_string());
        self
    }

    pub fn failing_download(mut self, message: &str) -> Self {
        self.download_error = Some(message.to_string());
        self
    }

    pub fn failing_formats(mut self, message: &str) -> Self {
        self.formats_error = Some(message.to_string());
        self
    }

    pub fn producing_no_files(mut self) -> Self {
        self.no_files = true;
        self
    }

    pub fn info_calls(&self) -> usize {
        *self.info_calls.lock().unwrap()
    }

    pub fn download_calls(&self) -> Vec<(String, EngineOptions)> {
        self.download_calls.lock().unwrap().clone()
    }

    pub fn format_calls(&self) -> Vec<String> {
        self.format_calls.lock().unwrap().clone()
    }

    fn scripted_failure(url: &str, message: &str) -> BackendError {
        BackendError::failed(url, Some(1), message)
    }
}

#[async_trait]
impl MediaBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract_info(&self, url: &str) -> Result<MediaInfo, BackendError> {
        *self.info_calls.lock().unwrap() += 1;
        if let Some(message) = &self.info_error {
            return Err(Self::scripted_failure(url, message));
        }
        Ok(self.info.clone().unwrap_or_default())
    }

    async fn download(
        &self,
        url: &str,
        options: &EngineOptions,
        on_event: &mut (dyn FnMut(BackendEvent) + Send),
    ) -> Result<DownloadOutcome, BackendError> {
        self.download_calls
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));
        if let Some(message) = &self.download_error {
            return Err(Self::scripted_failure(url, message));
        }
        if self.no_files {
            return Ok(DownloadOutcome {
                files: Vec::new(),
                exit_code: Some(0),
            });
        }

        let title = self
            .info
            .as_ref()
            .and_then(|info| info.title.clone())
            .unwrap_or_else(|| "video".to_string());
        let file = PathBuf::from(format!("/downloads/{title}.mp4"));
        on_event(BackendEvent::Progress(50.0));
        on_event(BackendEvent::Progress(100.0));
        on_event(BackendEvent::Finished(file.clone()));
        Ok(DownloadOutcome {
            files: vec![file],
            exit_code: Some(0),
        })
    }

    async fn list_formats(&self, url: &str) -> Result<(), BackendError> {
        self.format_calls.lock().unwrap().push(url.to_string());
        match &self.formats_error {
            Some(message) => Err(Self::scripted_failure(url, message)),
            None => Ok(()),
        }
    }
}

/// Console that records output and answers prompts with a fixed reply.
#[derive(Default)]
pub struct RecordingConsole {
    answer: bool,
    lines: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
    questions: Mutex<Vec<String>>,
    progress: Mutex<Vec<f64>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Plain lines, in order (success lines excluded).
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn progress_updates(&self) -> Vec<f64> {
        self.progress.lock().unwrap().clone()
    }
}

impl Console for RecordingConsole {
    fn line(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn progress(&self, percent: f64) {
        self.progress.lock().unwrap().push(percent);
    }

    fn finish_progress(&self) {}

    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer
    }
}
