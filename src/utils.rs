//! Utility functions for the fetch window, log formatting, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Publish-date window calculation in the API's wire timestamp format
//! - String truncation for logging response bodies
//! - File system validation for the output location

use crate::models::FetchWindow;
use chrono::{DateTime, Duration, Utc};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Default length of the trailing fetch window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Timestamp format accepted by `publishedAfter` / `publishedBefore`.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Compute the trailing window of `days` days ending now.
///
/// # Returns
///
/// A [`FetchWindow`] whose `published_before` is the current UTC time and
/// whose `published_after` is `days` days earlier.
#[instrument(level = "debug")]
pub fn fetch_window(days: i64) -> FetchWindow {
    fetch_window_at(Utc::now(), days)
}

/// Compute the trailing window of `days` days ending at `now`.
///
/// Both bounds are serialized with second precision and a literal `Z`.
/// A window reaching past the representable range starts at the Unix epoch.
///
/// # Examples
///
/// ```ignore
/// let now = Utc.with_ymd_and_hms(2025, 10, 26, 9, 30, 0).unwrap();
/// let window = fetch_window_at(now, 365);
/// assert_eq!(window.published_after, "2024-10-26T09:30:00Z");
/// assert_eq!(window.published_before, "2025-10-26T09:30:00Z");
/// ```
pub fn fetch_window_at(now: DateTime<Utc>, days: i64) -> FetchWindow {
    let after = Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or_else(|| {
            warn!(days, "Window start out of range; starting at the Unix epoch");
            DateTime::UNIX_EPOCH
        });
    let window = FetchWindow {
        published_after: after.format(WIRE_TIMESTAMP_FORMAT).to_string(),
        published_before: now.format(WIRE_TIMESTAMP_FORMAT).to_string(),
    };
    debug!(after = %window.published_after, before = %window.published_before, "Computed fetch window");
    window
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory that will hold `file_path` exists and is writable.
///
/// Creates the parent directory if needed, then performs a write test by
/// creating and immediately deleting a probe file. A bare file name
/// checks the current directory.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %file_path.display()))]
pub async fn ensure_parent_writable(file_path: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match file_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&dir).await?;

    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
