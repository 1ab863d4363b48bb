//! Paginated fetch of a channel's short videos.
//!
//! [`VideoFetcher`] walks the cursor-based `search.list` endpoint one page
//! at a time until the service stops returning a continuation token.
//!
//! # Failure Handling
//!
//! A failed page (transport error, HTTP error, service-reported error or an
//! undecodable body) ends pagination but never discards earlier pages: the
//! records accumulated so far are returned as a normal result. The
//! [`FetchReport`] returned by [`VideoFetcher::fetch_report`] records which
//! of the two endings happened; [`VideoFetcher::fetch_videos`] returns only
//! the records.

use crate::api::{SearchApi, SearchRequest};
use crate::models::VideoRecord;
use crate::utils::{fetch_window, DEFAULT_WINDOW_DAYS};
use tracing::{error, info, instrument};

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The service stopped returning a continuation token.
    Exhausted,
    /// Page `page` (1-based) failed; later pages were never requested.
    Truncated { page: usize, reason: String },
}

/// Records produced by one fetch, plus how pagination ended.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Normalized records, newest first, pages concatenated in request order.
    pub videos: Vec<VideoRecord>,
    /// Number of pages that returned successfully.
    pub pages: usize,
    pub outcome: FetchOutcome,
}

impl FetchReport {
    pub fn is_truncated(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Truncated { .. })
    }
}

/// Fetches every short video a channel published in a trailing window.
#[derive(Debug)]
pub struct VideoFetcher<S> {
    api: S,
    window_days: i64,
}

impl<S: SearchApi> VideoFetcher<S> {
    /// Create a fetcher over `api` using the default 365-day window.
    pub fn new(api: S) -> Self {
        Self {
            api,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Override the length of the trailing window.
    pub fn with_window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    /// Borrow the underlying search backend.
    pub fn api(&self) -> &S {
        &self.api
    }

    /// Fetch all short videos for `channel_id` in the window.
    ///
    /// # Arguments
    ///
    /// * `channel_id` - Channel to search
    /// * `max_results` - Page size, passed through unchanged; callers clamp it
    ///
    /// # Returns
    ///
    /// The accumulated records. A mid-pagination failure yields the pages
    /// fetched before it; see [`VideoFetcher::fetch_report`] to tell the two
    /// endings apart.
    pub async fn fetch_videos(&self, channel_id: &str, max_results: u32) -> Vec<VideoRecord> {
        self.fetch_report(channel_id, max_results).await.videos
    }

    /// Fetch all short videos and report how pagination ended.
    #[instrument(level = "info", skip(self), fields(window_days = self.window_days))]
    pub async fn fetch_report(&self, channel_id: &str, max_results: u32) -> FetchReport {
        let window = fetch_window(self.window_days);
        info!(
            after = %window.published_after,
            before = %window.published_before,
            "Fetching short videos"
        );

        let mut videos: Vec<VideoRecord> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        let outcome = loop {
            let request = SearchRequest {
                channel_id: channel_id.to_string(),
                published_after: window.published_after.clone(),
                published_before: window.published_before.clone(),
                max_results,
                page_token: page_token.take(),
            };
            let page_number = pages + 1;

            let page = match self.api.search(&request).await {
                Ok(page) => page,
                Err(e) => {
                    error!(page = page_number, error = %e, "Search request failed; stopping pagination");
                    break FetchOutcome::Truncated {
                        page: page_number,
                        reason: e.to_string(),
                    };
                }
            };
            pages = page_number;

            let found = page.items.len();
            videos.extend(page.items.iter().map(VideoRecord::from_search_result));
            info!(
                page = page_number,
                found,
                total = videos.len(),
                "Fetched page"
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break FetchOutcome::Exhausted,
            }
        };

        info!(total = videos.len(), pages, ?outcome, "Fetch complete");
        FetchReport {
            videos,
            pages,
            outcome,
        }
    }
}
