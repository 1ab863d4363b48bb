//! Output generation for fetched videos.
//!
//! # Submodules
//!
//! - [`json`]: Writes the video list to a JSON file
//! - [`summary`]: Renders a human-readable listing for the console

pub mod json;
pub mod summary;
