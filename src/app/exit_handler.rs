//! Exit code logic for the ytcli-dl process.
//!
//! Single responsibility: map the run result to the process exit outcome.

use anyhow::{Result, bail};

use crate::ProcessExit;

/// Determines the process exit outcome after a download run.
///
/// Interruption wins over success; a failed run becomes an error so it is
/// reported with the usual help hint.
pub(crate) fn determine_exit_outcome(succeeded: bool, interrupted: bool) -> Result<ProcessExit> {
    if interrupted {
        bail!("Download interrupted by user");
    }
    if !succeeded {
        bail!("Download failed or was cancelled");
    }
    Ok(ProcessExit::Success)
}
