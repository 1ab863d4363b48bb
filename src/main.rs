//! # yt_shorts_fetch
//!
//! Lists the short videos a YouTube channel published over the last year
//! and saves them to a JSON file.
//!
//! ## Usage
//!
//! ```sh
//! YOUTUBE_API_KEY=... yt_shorts_fetch --channel-id UC-tE4p-L9f0-w1T1-v8a-qA -o youtube_videos.json
//! ```

use clap::Parser;
use dotenv::dotenv;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use yt_shorts_fetch::api::YouTubeClient;
use yt_shorts_fetch::cli::{prompt_api_key, Cli};
use yt_shorts_fetch::config::{load_config, FileConfig, Settings};
use yt_shorts_fetch::fetcher::{FetchOutcome, VideoFetcher};
use yt_shorts_fetch::outputs::{json, summary};
use yt_shorts_fetch::utils::ensure_parent_writable;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // .env is optional; its values only fill variables that are not set.
    if dotenv().is_ok() {
        debug!("Loaded .env file");
    }

    let args = Cli::parse();
    debug!(?args.channel_id, ?args.output, ?args.config, "Parsed CLI arguments");

    let file_config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let mut settings = Settings::resolve(&args, file_config);

    // Prompt before installing the Ctrl-C handler so an interrupt here
    // simply kills the process.
    let api_key = match settings.api_key.take() {
        Some(key) => key,
        None => prompt_api_key()?,
    };

    tokio::select! {
        res = run(settings, api_key) => res,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; discarding any fetched pages");
            println!("\n\nOperation cancelled by user.");
            Ok(())
        }
    }
}

#[instrument(level = "info", skip_all, fields(channel_id = %settings.channel_id))]
async fn run(settings: Settings, api_key: String) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    // Early check: the output location must be writable before spending quota.
    if let Err(e) = ensure_parent_writable(&settings.output).await {
        error!(
            path = %settings.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = YouTubeClient::with_options(api_key, &settings.base_url, settings.timeout)?;
    info!("YouTube API client initialized");

    let fetcher = VideoFetcher::new(client).with_window_days(settings.window_days);
    let report = fetcher
        .fetch_report(&settings.channel_id, settings.max_results)
        .await;

    if let FetchOutcome::Truncated { page, reason } = &report.outcome {
        warn!(
            page,
            kept = report.videos.len(),
            %reason,
            "Pagination stopped early; results are incomplete"
        );
    }

    if report.videos.is_empty() {
        println!("No videos found matching the criteria.");
        return Ok(());
    }

    print!("{}", summary::render_summary(&report.videos));

    match json::write_videos(&report.videos, &settings.output).await {
        Ok(()) => println!("✓ Video data saved to {}", settings.output.display()),
        Err(e) => error!(path = %settings.output.display(), error = %e, "Failed to write JSON output"),
    }

    println!(
        "\n✓ Successfully fetched {} short videos from the channel",
        report.videos.len()
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        videos = report.videos.len(),
        pages = report.pages,
        "Execution complete"
    );
    Ok(())
}
