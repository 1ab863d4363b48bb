//! # yt_shorts_fetch
//!
//! Fetches metadata for the short videos a single YouTube channel published
//! within a trailing window, using the Data API v3 `search.list` endpoint.
//!
//! ## Architecture
//!
//! 1. **Window**: [`utils::fetch_window`] derives the `publishedAfter` /
//!    `publishedBefore` bounds from the current time
//! 2. **Pagination**: [`fetcher::VideoFetcher`] walks the continuation
//!    tokens one page at a time over any [`api::SearchApi`] backend
//! 3. **Normalization**: [`models::VideoRecord::from_search_result`] maps
//!    each raw search item to a fixed-shape record
//!
//! Console and file output live in [`outputs`].

pub mod api;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod outputs;
pub mod utils;
