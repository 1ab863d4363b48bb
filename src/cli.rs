//! Command-line interface definitions for yt_shorts_fetch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the target channel can also come from environment
//! variables (a `.env` file in the working directory is loaded first), and
//! every option can be set in the `--config` YAML file.

use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command-line arguments for the yt_shorts_fetch application.
///
/// All options are optional; unset ones fall back to the config file and
/// then to built-in defaults (see [`crate::config::Settings::resolve`]).
///
/// # Examples
///
/// ```sh
/// # Default channel, key from YOUTUBE_API_KEY
/// yt_shorts_fetch
///
/// # Another channel, last 90 days, custom output
/// yt_shorts_fetch --channel-id UCxxxx -d 90 -o data/shorts.json
///
/// # Against a local mock of the Data API
/// yt_shorts_fetch --base-url http://localhost:8080/youtube/v3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YouTube channel ID to fetch short videos from
    #[arg(long, env = "YOUTUBE_CHANNEL_ID")]
    pub channel_id: Option<String>,

    /// YouTube Data API key (prompted for when not provided)
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path of the JSON file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Results per page (1-50)
    #[arg(short = 'n', long)]
    pub max_results: Option<u32>,

    /// Length of the trailing publish window, in days
    #[arg(short, long)]
    pub days: Option<i64>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the Data API
    #[arg(long, env = "YOUTUBE_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Ask for the API key on stdin.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the entered key is blank.
pub fn prompt_api_key() -> Result<String, Box<dyn Error>> {
    println!("YouTube Data API key not found in environment variables.");
    println!("Please set the YOUTUBE_API_KEY environment variable or enter it below.");
    print!("Enter your YouTube Data API key: ");
    io::stdout().flush()?;

    read_api_key(io::stdin().lock())
}

fn read_api_key<R: BufRead>(mut input: R) -> Result<String, Box<dyn Error>> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim().to_string();
    if key.is_empty() {
        return Err("API key is required to proceed".into());
    }
    Ok(key)
}
