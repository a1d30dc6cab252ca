//! Error types for the media engine backend.

use thiserror::Error;

/// Errors raised while driving the external media engine.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The engine executable could not be found
    #[error("'{program}' was not found. Install yt-dlp or pass --ytdlp-path")]
    NotInstalled {
        /// Program name or path that was tried
        program: String,
    },

    /// The engine process could not be started
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program name or path that was tried
        program: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but reported failure
    #[error("{message}")]
    Failed {
        /// URL being processed
        url: String,
        /// Process exit code, if any
        code: Option<i32>,
        /// Last error line printed by the engine
        message: String,
    },

    /// The engine printed output that could not be decoded
    #[error("unreadable engine output for {url}: {source}")]
    InvalidOutput {
        /// URL being processed
        url: String,
        /// The JSON decode error
        #[source]
        source: serde_json::Error,
    },

    /// IO failure while talking to the engine process
    #[error("IO error talking to engine: {source}")]
    Io {
        /// The underlying IO error
        #[from]
        source: std::io::Error,
    },
}

impl BackendError {
    /// Maps a spawn failure, distinguishing a missing executable.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        let program = program.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotInstalled { program }
        } else {
            Self::Spawn { program, source }
        }
    }

    /// Builds a `Failed` error from captured stderr.
    ///
    /// Uses the last `ERROR:` line when present, otherwise the last non-empty line.
    pub fn failed(url: impl Into<String>, code: Option<i32>, stderr: &str) -> Self {
        let lines: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let message = lines
            .iter()
            .rev()
            .find(|line| line.starts_with("ERROR:"))
            .or_else(|| lines.last())
            .map_or_else(
                || match code {
                    Some(code) => format!("engine exited with status {code}"),
                    None => "engine terminated by signal".to_string(),
                },
                |line| (*line).to_string(),
            );
        Self::Failed {
            url: url.into(),
            code,
            message,
        }
    }
}
