//! User-facing console output and prompts.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::debug;

/// How often a pending prompt checks the interrupt flag.
const PROMPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Sink for everything the downloader shows to or asks of the user.
pub trait Console: Send + Sync {
    /// Prints a plain line.
    fn line(&self, message: &str);

    /// Prints a success line (green on color terminals).
    fn success(&self, message: &str);

    /// Updates the progress of the file currently downloading (0-100).
    fn progress(&self, percent: f64);

    /// Clears any progress display.
    fn finish_progress(&self);

    /// Asks a yes/no question, defaulting to no.
    fn confirm(&self, question: &str) -> bool;
}

/// Console writing to stdout, with an `indicatif` bar on stderr for progress.
pub struct TerminalConsole {
    color: bool,
    bar: Mutex<Option<ProgressBar>>,
    interrupted: Option<Arc<AtomicBool>>,
}

impl TerminalConsole {
    /// Creates a console; `color` controls green success lines.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            bar: Mutex::new(None),
            interrupted: None,
        }
    }

    /// Makes pending prompts answer "no" once `interrupted` is raised.
    #[must_use]
    pub fn with_interrupt_flag(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(interrupted);
        self
    }

    fn with_bar<R>(&self, f: impl FnOnce(&mut Option<ProgressBar>) -> R) -> R {
        let mut guard = match self.bar.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut *guard)
    }

    /// Runs `print` without tearing an active progress bar.
    fn print_suspended(&self, print: impl FnOnce()) {
        self.with_bar(|bar| match bar {
            Some(bar) => bar.suspend(print),
            None => print(),
        });
    }
}

impl Console for TerminalConsole {
    fn line(&self, message: &str) {
        self.print_suspended(|| println!("{message}"));
    }

    fn success(&self, message: &str) {
        if self.color {
            let styled = message.green();
            self.print_suspended(|| println!("{styled}"));
        } else {
            self.line(message);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn progress(&self, percent: f64) {
        let position = (percent.clamp(0.0, 100.0) * 10.0).round() as u64;
        self.with_bar(|bar| {
            let bar = bar.get_or_insert_with(|| {
                let bar = ProgressBar::new(1000);
                bar.set_style(
                    ProgressStyle::with_template("{bar:40} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            });
            bar.set_position(position);
            bar.set_message(format!("{percent:5.1}%"));
        });
    }

    fn finish_progress(&self) {
        self.with_bar(|bar| {
            if let Some(bar) = bar.take() {
                bar.finish_and_clear();
            }
        });
    }

    fn confirm(&self, question: &str) -> bool {
        self.finish_progress();
        print!("{question} [y/N]: ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let answer = match &self.interrupted {
            None => read_answer(),
            Some(interrupted) => {
                let (tx, rx) = mpsc::channel();
                std::thread::spawn(move || {
                    let _ = tx.send(read_answer());
                });
                block_worker(|| wait_for_answer(&rx, interrupted))
            }
        };
        match answer {
            Some(answer) => is_yes(&answer),
            None => {
                println!();
                false
            }
        }
    }
}

/// Reads one line from stdin. `None` on EOF or a read error.
fn read_answer() -> Option<String> {
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(answer),
    }
}

/// Waits for the stdin reader, giving up once `interrupted` is raised.
fn wait_for_answer(rx: &Receiver<Option<String>>, interrupted: &AtomicBool) -> Option<String> {
    loop {
        if interrupted.load(Ordering::SeqCst) {
            debug!("prompt abandoned after interrupt");
            return None;
        }
        match rx.recv_timeout(PROMPT_POLL_INTERVAL) {
            Ok(answer) => return answer,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

/// Runs blocking `f`, handing this worker's other tasks to the runtime first.
fn block_worker<R>(f: impl FnOnce() -> R) -> R {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
