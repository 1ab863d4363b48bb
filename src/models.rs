//! Data models for search results and their normalized representation.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SearchListResponse`]: One page of the YouTube Data API `search.list` response
//! - [`SearchResult`]: A single raw `youtube#searchResult` item
//! - [`VideoRecord`]: The fixed-shape record every raw item is normalized into
//! - [`FetchWindow`]: The publish-date range a fetch is restricted to
//!
//! The wire types use camelCase field names to match the JSON returned by
//! the API, hence the `#[serde(rename_all = "camelCase")]` attributes.

use serde::{Deserialize, Serialize};

/// Prefix of the canonical watch URL derived from a video identifier.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// One page of a `search.list` response.
///
/// Only the fields the fetcher consumes are modeled. A missing `items`
/// array is treated as an empty page.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    /// Search results on this page, newest first.
    #[serde(default)]
    pub items: Vec<SearchResult>,
    /// Continuation token; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// Result counts reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

/// Result counts attached to a search page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Approximate total number of matches across all pages.
    pub total_results: u64,
    /// Number of results included on this page.
    pub results_per_page: u64,
}

/// A raw search result of type `video`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: Snippet,
}

/// Identifier block of a search result.
///
/// Requests are restricted to `type=video`, so `videoId` is always present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

/// Snippet block of a search result.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnail set; only the default resolution is consumed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

/// A normalized short video.
///
/// Serialized with the key names of the JSON export (`video_id`,
/// `video_url`, ...).
///
/// # Fields
///
/// * `id` - Platform-assigned video identifier
/// * `url` - Canonical watch URL, always derived from `id`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoRecord {
    /// The platform-assigned video identifier.
    #[serde(rename = "video_id")]
    pub id: String,
    /// The video title.
    pub title: String,
    /// The video description as returned by search (may be shortened by the service).
    pub description: String,
    /// Publish timestamp in the wire format returned by the service.
    pub published_at: String,
    /// Display name of the publishing channel.
    pub channel_title: String,
    /// Default-resolution thumbnail URL, or an empty string when absent.
    pub thumbnail_url: String,
    /// Canonical watch URL.
    #[serde(rename = "video_url")]
    pub url: String,
}

impl VideoRecord {
    /// Normalize a raw search result into a [`VideoRecord`].
    ///
    /// Pure and total over the typed item: the only optional input is the
    /// default thumbnail, which maps to `""` when missing.
    pub fn from_search_result(item: &SearchResult) -> Self {
        let snippet = &item.snippet;
        let thumbnail_url = snippet
            .thumbnails
            .default
            .as_ref()
            .map(|t| t.url.clone())
            .unwrap_or_default();

        Self {
            id: item.id.video_id.clone(),
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            published_at: snippet.published_at.clone(),
            channel_title: snippet.channel_title.clone(),
            thumbnail_url,
            url: watch_url(&item.id.video_id),
        }
    }

    /// Whether two records describe the same video, regardless of field drift.
    pub fn same_video(&self, other: &VideoRecord) -> bool {
        self.id == other.id
    }
}

impl From<&SearchResult> for VideoRecord {
    fn from(item: &SearchResult) -> Self {
        VideoRecord::from_search_result(item)
    }
}

/// Build the canonical watch URL for a video identifier.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Publish-date bounds of a fetch, as wire-format timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    /// Lower bound (`publishedAfter`).
    pub published_after: String,
    /// Upper bound (`publishedBefore`), i.e. "now".
    pub published_before: String,
}
