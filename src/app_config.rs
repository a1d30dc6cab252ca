//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ytcli_core::{APP_NAME, Quality};

/// TOML-backed file configuration for ytcli-dl defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default output directory for downloads.
    pub output_dir: Option<PathBuf>,
    /// Default video quality label.
    pub quality: Option<Quality>,
    /// Download audio only unless overridden.
    pub audio_only: Option<bool>,
    /// Skip the playlist confirmation prompt.
    pub assume_yes: Option<bool>,
    /// yt-dlp executable to run.
    pub ytdlp_path: Option<PathBuf>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Debug,
}

impl VerbositySetting {
    /// Log filter used when neither `RUST_LOG` nor `--verbose` is given.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/ytcli-dl/config.toml`
/// 2. `$HOME/.config/ytcli-dl/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_NAME).join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "output_dir" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `output_dir` value on line {line_number}")
                })?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "quality" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `quality` value on line {line_number}"))?;
                let quality = parsed.parse::<Quality>().map_err(|reason| {
                    anyhow::anyhow!("Invalid `quality` value on line {line_number}: {reason}")
                })?;
                cfg.quality = Some(quality);
            }
            "audio_only" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `audio_only` value on line {line_number}")
                })?;
                cfg.audio_only = Some(parsed);
            }
            "assume_yes" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `assume_yes` value on line {line_number}")
                })?;
                cfg.assume_yes = Some(parsed);
            }
            "ytdlp_path" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `ytdlp_path` value on line {line_number}")
                })?;
                if parsed.trim().is_empty() {
                    bail!("Invalid `ytdlp_path` value on line {line_number}: path is empty");
                }
                cfg.ytdlp_path = Some(PathBuf::from(parsed));
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_number}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, debug"),
    }
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}
