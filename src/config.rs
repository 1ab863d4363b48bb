//! Run configuration: optional YAML file merged with command-line arguments.
//!
//! Precedence, highest first:
//! 1. Command-line flags (and their environment variable fallbacks)
//! 2. Values from the `--config` YAML file
//! 3. Built-in defaults
//!
//! # Example file
//!
//! ```yaml
//! channel_id: UC-tE4p-L9f0-w1T1-v8a-qA
//! max_results: 50
//! window_days: 365
//! output: data/youtube_videos.json
//! ```

use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MAX_RESULTS_LIMIT};
use crate::cli::Cli;
use crate::utils::DEFAULT_WINDOW_DAYS;
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Channel fetched when none is configured.
pub const DEFAULT_CHANNEL_ID: &str = "UC-tE4p-L9f0-w1T1-v8a-qA";

/// Longest accepted trailing window (one century), in days.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Output file written when none is configured.
pub const DEFAULT_OUTPUT: &str = "youtube_videos.json";

/// Contents of the optional YAML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
    pub max_results: Option<u32>,
    pub window_days: Option<i64>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load and parse a YAML configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for
/// [`FileConfig`] (unknown keys are rejected).
#[instrument(level = "info")]
pub fn load_config(path: &str) -> Result<FileConfig, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let config: FileConfig = serde_yaml::from_str(&raw)?;
    info!(path, "Loaded configuration");
    Ok(config)
}

/// Fully resolved settings for one run.
///
/// `api_key` stays optional here; the binary prompts for it when neither
/// the CLI, the environment nor the config file supplied one.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub channel_id: String,
    pub max_results: u32,
    pub window_days: i64,
    pub output: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
}

impl Settings {
    /// Merge CLI arguments over file values over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let api_key = cli
            .api_key
            .clone()
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let requested = cli.max_results.or(file.max_results).unwrap_or(MAX_RESULTS_LIMIT);

        let window_days = match cli.days.or(file.window_days) {
            Some(days) if days > MAX_WINDOW_DAYS => {
                warn!(days, max = MAX_WINDOW_DAYS, "Window too long; clamping");
                MAX_WINDOW_DAYS
            }
            Some(days) if days > 0 => days,
            Some(days) => {
                warn!(days, default = DEFAULT_WINDOW_DAYS, "Ignoring non-positive window; using default");
                DEFAULT_WINDOW_DAYS
            }
            None => DEFAULT_WINDOW_DAYS,
        };

        Self {
            api_key,
            channel_id: cli
                .channel_id
                .clone()
                .or(file.channel_id)
                .unwrap_or_else(|| DEFAULT_CHANNEL_ID.to_string()),
            max_results: clamp_max_results(requested),
            window_days,
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            base_url: cli
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

/// Clamp a requested page size into `1..=MAX_RESULTS_LIMIT`.
///
/// The search endpoint rejects larger pages outright, so this runs before
/// the first request rather than inside the paginator.
pub fn clamp_max_results(requested: u32) -> u32 {
    let clamped = requested.clamp(1, MAX_RESULTS_LIMIT);
    if clamped != requested {
        warn!(requested, clamped, "Page size out of range; clamping");
    }
    clamped
}
