use std::path::PathBuf;

use anyhow::{Result, bail};

/// Where the URLs of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputSource {
    Url(String),
    File(PathBuf),
}

pub(crate) fn require_list_formats_url(url: Option<&str>) -> Result<&str> {
    match url {
        Some(url) => Ok(url),
        None => bail!("--list-formats requires a URL"),
    }
}

pub(crate) fn resolve_input_source(
    url: Option<String>,
    file: Option<PathBuf>,
) -> Result<InputSource> {
    match (url, file) {
        (None, None) => bail!("You must provide either a URL or use --file option"),
        (Some(_), Some(_)) => {
            bail!("Cannot use both URL argument and --file option simultaneously")
        }
        (Some(url), None) => Ok(InputSource::Url(url)),
        (None, Some(file)) => Ok(InputSource::File(file)),
    }
}

pub(crate) fn ensure_format_code_compatible(
    format_code: Option<&str>,
    audio_only: bool,
) -> Result<()> {
    if format_code.is_some() && audio_only {
        bail!("Cannot use --format-code with --audio-only");
    }
    Ok(())
}
