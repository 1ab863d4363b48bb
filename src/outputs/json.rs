//! JSON file output.
//!
//! The video list is written as a single JSON array, pretty-printed with
//! two-space indentation. Non-ASCII text (titles, descriptions) is kept
//! literally rather than escaped.

use crate::models::VideoRecord;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `videos` to `path` as a pretty-printed JSON array.
///
/// Creates the parent directory when it does not exist yet.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = videos.len()))]
pub async fn write_videos(videos: &[VideoRecord], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(videos)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!("Wrote video JSON file");
    Ok(())
}
