//! Console listing of fetched videos.

use crate::models::VideoRecord;

const RULE_WIDTH: usize = 80;

/// Render a numbered listing of `videos`.
///
/// Each entry shows the title, video ID, publish timestamp and watch URL.
/// An empty list renders as `"No videos found."`.
pub fn render_summary(videos: &[VideoRecord]) -> String {
    if videos.is_empty() {
        return "No videos found.\n".to_string();
    }

    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{rule}\nVIDEO SUMMARY\n{rule}\n");
    for (i, video) in videos.iter().enumerate() {
        out.push_str(&format!("\n{:3}. {}\n", i + 1, video.title));
        out.push_str(&format!("     Video ID: {}\n", video.id));
        out.push_str(&format!("     Published: {}\n", video.published_at));
        out.push_str(&format!("     URL: {}\n", video.url));
    }
    out.push_str(&format!("\n{rule}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::watch_url;

    #[test]
    fn test_empty_summary() {
        assert_eq!(render_summary(&[]), "No videos found.\n");
    }

    #[test]
    fn test_summary_entries() {
        let videos = vec![VideoRecord {
            id: "abc123".to_string(),
            title: "First short".to_string(),
            description: String::new(),
            published_at: "2025-10-01T12:00:00Z".to_string(),
            channel_title: "Chan".to_string(),
            thumbnail_url: String::new(),
            url: watch_url("abc123"),
        }];

        let out = render_summary(&videos);
        assert!(out.contains("VIDEO SUMMARY"));
        assert!(out.contains(&"=".repeat(80)));
        assert!(out.contains("\n  1. First short\n"));
        assert!(out.contains("     Video ID: abc123\n"));
        assert!(out.contains("     Published: 2025-10-01T12:00:00Z\n"));
        assert!(out.contains("     URL: https://www.youtube.com/watch?v=abc123\n"));
    }
}
