//! YouTube Data API v3 search client.
//!
//! This module provides the transport seam between the paginator and the
//! `search.list` endpoint.
//!
//! # Architecture
//!
//! The module uses a trait-based design so the paginator can be driven by
//! any backend:
//! - [`SearchApi`]: Core trait defining one async search call
//! - [`YouTubeClient`]: HTTPS implementation authenticated by a static API key
//! - [`SearchRequest`]: The logical request, including the fixed filters
//!
//! There is deliberately no retry layer: a failed call is reported once and
//! the caller decides what to do with it.

use crate::models::SearchListResponse;
use crate::utils::truncate_for_log;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Production endpoint of the YouTube Data API v3.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest `maxResults` the search endpoint accepts.
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Default transport timeout for a single page request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API key must not be empty")]
    EmptyApiKey,
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Service error {code}: {message}")]
    Service { code: u16, message: String },
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One logical `search.list` call.
///
/// The filters that never change (`part`, `videoDuration`, `type`, `order`)
/// are added by [`SearchRequest::query_pairs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub channel_id: String,
    pub published_after: String,
    pub published_before: String,
    pub max_results: u32,
    pub page_token: Option<String>,
}

impl SearchRequest {
    /// Query parameters for this request, excluding the credential.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("part", "snippet".to_string()),
            ("channelId", self.channel_id.clone()),
            ("publishedAfter", self.published_after.clone()),
            ("publishedBefore", self.published_before.clone()),
            ("videoDuration", "short".to_string()),
            ("type", "video".to_string()),
            ("maxResults", self.max_results.to_string()),
            ("order", "date".to_string()),
        ];
        if let Some(token) = &self.page_token {
            pairs.push(("pageToken", token.clone()));
        }
        pairs
    }
}

/// Trait for a paginated video search backend.
///
/// Implementors answer one page per call. The paginator only ever has a
/// single call in flight.
pub trait SearchApi {
    /// Execute one search request and return the decoded page.
    async fn search(&self, request: &SearchRequest) -> Result<SearchListResponse, ClientError>;
}

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u16,
    #[serde(default)]
    message: String,
}

/// Classify a non-success response body.
///
/// Google-style `{"error": {"code", "message"}}` bodies become
/// [`ClientError::Service`]; anything else keeps the raw status and a
/// shortened body.
fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ClientError::Service {
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => ClientError::Status {
            status,
            body: truncate_for_log(body, 300),
        },
    }
}

/// HTTPS client for the `search.list` endpoint.
pub struct YouTubeClient {
    http: reqwest::Client,
    search_url: Url,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyApiKey`] for a blank key, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client against an arbitrary base URL (e.g. a local mock server).
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ClientError::EmptyApiKey);
        }

        let search_url = search_endpoint(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(%search_url, ?timeout, "YouTube client initialized");
        Ok(Self {
            http,
            search_url,
            api_key,
        })
    }

    /// The resolved `search` endpoint.
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

/// Resolve `{base_url}/search`, keeping any path prefix of the base.
fn search_endpoint(base_url: &str) -> Result<Url, ClientError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("search")?)
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("search_url", &self.search_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SearchApi for YouTubeClient {
    #[instrument(level = "debug", skip_all, fields(page_token = ?request.page_token))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchListResponse, ClientError> {
        let t0 = Instant::now();
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&request.query_pairs())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            let err = error_from_response(status, &body);
            warn!(elapsed_ms = dt.as_millis() as u64, %status, error = %err, "search request rejected");
            return Err(err);
        }

        debug!(elapsed_ms = dt.as_millis() as u64, bytes = body.len(), "search request succeeded");
        Ok(serde_json::from_str::<SearchListResponse>(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchOutcome, VideoFetcher};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn request(page_token: Option<&str>) -> SearchRequest {
        SearchRequest {
            channel_id: "UC-tE4p-L9f0-w1T1-v8a-qA".to_string(),
            published_after: "2024-10-26T09:30:00Z".to_string(),
            published_before: "2025-10-26T09:30:00Z".to_string(),
            max_results: 50,
            page_token: page_token.map(str::to_string),
        }
    }

    /// Serve exactly one HTTP response and hand back the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/youtube/v3", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&head).to_string()
        });
        (base, handle)
    }

    #[test]
    fn test_query_pairs_first_page() {
        let pairs = request(None).query_pairs();
        assert!(pairs.contains(&("part", "snippet".to_string())));
        assert!(pairs.contains(&("channelId", "UC-tE4p-L9f0-w1T1-v8a-qA".to_string())));
        assert!(pairs.contains(&("publishedAfter", "2024-10-26T09:30:00Z".to_string())));
        assert!(pairs.contains(&("publishedBefore", "2025-10-26T09:30:00Z".to_string())));
        assert!(pairs.contains(&("videoDuration", "short".to_string())));
        assert!(pairs.contains(&("type", "video".to_string())));
        assert!(pairs.contains(&("maxResults", "50".to_string())));
        assert!(pairs.contains(&("order", "date".to_string())));
        assert!(pairs.iter().all(|(k, _)| *k != "pageToken"));
    }

    #[test]
    fn test_query_pairs_with_token() {
        let pairs = request(Some("CDIQAA")).query_pairs();
        assert!(pairs.contains(&("pageToken", "CDIQAA".to_string())));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(YouTubeClient::new("   "), Err(ClientError::EmptyApiKey)));
        assert!(matches!(YouTubeClient::new(""), Err(ClientError::EmptyApiKey)));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = YouTubeClient::with_options("key", "not a url", DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_search_endpoint_keeps_prefix() {
        let client = YouTubeClient::new("key").unwrap();
        assert_eq!(client.search_url().as_str(), "https://www.googleapis.com/youtube/v3/search");

        let client = YouTubeClient::with_options("key", "http://localhost:8080/youtube/v3/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.search_url().as_str(), "http://localhost:8080/youtube/v3/search");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = YouTubeClient::new("super-secret").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_service_error_body_classified() {
        let body = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota.","errors":[{"reason":"quotaExceeded"}]}}"#;
        match error_from_response(StatusCode::FORBIDDEN, body) {
            ClientError::Service { code, message } => {
                assert_eq!(code, 403);
                assert!(message.contains("quota"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body_keeps_status() {
        match error_from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") {
            ClientError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "<html>bad gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_against_local_server() {
        let body = r#"{"items":[{"id":{"videoId":"abc123"},"snippet":{"title":"t","description":"d","publishedAt":"2025-10-01T12:00:00Z","channelTitle":"c","thumbnails":{}}}]}"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = YouTubeClient::with_options("secret", &base, DEFAULT_TIMEOUT).unwrap();

        let page = client.search(&request(Some("tok1"))).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.next_page_token.is_none());

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /youtube/v3/search?"));
        assert!(request_line.contains("videoDuration=short"));
        assert!(request_line.contains("type=video"));
        assert!(request_line.contains("order=date"));
        assert!(request_line.contains("pageToken=tok1"));
        assert!(request_line.contains("key=secret"));
    }

    #[tokio::test]
    async fn test_search_surfaces_service_error() {
        let body = r#"{"error":{"code":400,"message":"Invalid value for maxResults"}}"#;
        let (base, server) = serve_once("400 Bad Request", body).await;
        let client = YouTubeClient::with_options("secret", &base, DEFAULT_TIMEOUT).unwrap();

        let err = client.search(&request(None)).await.unwrap_err();
        assert!(matches!(err, ClientError::Service { code: 400, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_truncates_fetch() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/youtube/v3", listener.local_addr().unwrap());
        drop(listener);

        let client = YouTubeClient::with_options("secret", &base, DEFAULT_TIMEOUT).unwrap();
        let err = client.search(&request(None)).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));

        let fetcher = VideoFetcher::new(client);
        let report = fetcher.fetch_report("UCchannel", 50).await;
        assert!(report.videos.is_empty());
        assert_eq!(report.pages, 0);
        assert!(matches!(report.outcome, FetchOutcome::Truncated { page: 1, .. }));
    }
}
