//! Unsplash photo search API client
//!
//! This module provides functionality to search photos on the Unsplash API
//! and parse the response into our ResultPage structure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{clamp_total_pages, ImageResult, ResultPage, PAGE_SIZE};

/// Base URL for the Unsplash API
pub const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

/// Path of the photo search endpoint, relative to the base URL
const SEARCH_PATH: &str = "/search/photos";

/// Upper bound on a single search request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur when fetching a page of search results
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with an error status
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can fetch a page of image search results
///
/// Caching is the caller's job; implementations should hit the backend on
/// every call.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Fetch page `page` (1-based) of results for `query`
    async fn fetch_page(&self, query: &str, page: u32) -> Result<ResultPage, SearchError>;
}

/// Response body of `GET /search/photos`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<PhotoRecord>,
    total_pages: u32,
}

/// A single photo as returned by the API
#[derive(Debug, Deserialize)]
struct PhotoRecord {
    id: String,
    urls: PhotoUrls,
    alt_description: Option<String>,
    description: Option<String>,
    user: PhotoUser,
    #[serde(default)]
    links: Option<PhotoLinks>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    thumb: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: Option<String>,
}

/// Error body returned by the API on failures, e.g. `{"errors": ["OAuth error"]}`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    errors: Vec<String>,
}

impl From<PhotoRecord> for ImageResult {
    fn from(record: PhotoRecord) -> Self {
        Self {
            id: record.id,
            thumbnail_url: record.urls.thumb,
            alt_description: record.alt_description,
            author_name: record.user.name,
            description: record.description,
            page_url: record.links.and_then(|links| links.html),
        }
    }
}

/// Client for searching photos on the Unsplash API
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    client_id: String,
}

impl UnsplashClient {
    /// Create a new UnsplashClient authenticating with the given access key
    pub fn new(client_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: UNSPLASH_BASE_URL.to_string(),
            client_id: client_id.into(),
        }
    }

    /// Point the client at a different API host (proxies, testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the search endpoint, without query parameters
    fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    /// Query parameters for a search request
    fn query_params(&self, query: &str, page: u32) -> [(&'static str, String); 4] {
        [
            ("client_id", self.client_id.clone()),
            ("page", page.to_string()),
            ("per_page", PAGE_SIZE.to_string()),
            ("query", query.to_string()),
        ]
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<ResultPage, SearchError> {
        let response = self
            .client
            .get(self.search_url())
            .query(&self.query_params(query, page))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        parse_response(&text)
    }
}

/// Parse a search response body into a ResultPage
pub fn parse_response(body: &str) -> Result<ResultPage, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;

    Ok(ResultPage {
        results: response.results.into_iter().map(ImageResult::from).collect(),
        total_pages: clamp_total_pages(response.total_pages),
    })
}

/// Extract a readable message from an error response body
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) if !err.errors.is_empty() => err.errors.join("; "),
        _ if body.trim().is_empty() => "empty response".to_string(),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response(total_pages: u32) -> String {
        format!(
            r#"{{
                "total": 2,
                "total_pages": {},
                "results": [
                    {{
                        "id": "eOLpJytrbsQ",
                        "description": "Santa on a sleigh",
                        "alt_description": "man in santa costume",
                        "urls": {{
                            "raw": "https://images.unsplash.com/photo-1?raw",
                            "thumb": "https://images.unsplash.com/photo-1?w=200"
                        }},
                        "links": {{ "html": "https://unsplash.com/photos/eOLpJytrbsQ" }},
                        "user": {{ "name": "Jeff Sheldon", "username": "ugmonk" }}
                    }},
                    {{
                        "id": "Dwu85P9SOIk",
                        "description": null,
                        "alt_description": null,
                        "urls": {{ "thumb": "https://images.unsplash.com/photo-2?w=200" }},
                        "user": {{ "name": "Annie Spratt" }}
                    }}
                ]
            }}"#,
            total_pages
        )
    }

    #[test]
    fn test_parse_response_maps_fields() {
        let page = parse_response(&sample_response(5)).expect("Should parse response");

        assert_eq!(page.total_pages, 5);
        assert_eq!(page.results.len(), 2);

        let first = &page.results[0];
        assert_eq!(first.id, "eOLpJytrbsQ");
        assert_eq!(first.thumbnail_url, "https://images.unsplash.com/photo-1?w=200");
        assert_eq!(first.alt_description.as_deref(), Some("man in santa costume"));
        assert_eq!(first.description.as_deref(), Some("Santa on a sleigh"));
        assert_eq!(first.author_name, "Jeff Sheldon");
        assert_eq!(
            first.page_url.as_deref(),
            Some("https://unsplash.com/photos/eOLpJytrbsQ")
        );
    }

    #[test]
    fn test_parse_response_handles_null_text_fields() {
        let page = parse_response(&sample_response(5)).expect("Should parse response");

        let second = &page.results[1];
        assert!(second.description.is_none());
        assert!(second.alt_description.is_none());
        assert!(second.page_url.is_none());
        assert_eq!(second.author_name, "Annie Spratt");
    }

    #[test]
    fn test_parse_response_clamps_total_pages() {
        let page = parse_response(&sample_response(500)).expect("Should parse response");
        assert_eq!(page.total_pages, 200);
    }

    #[test]
    fn test_parse_response_empty_results() {
        let page = parse_response(r#"{"total": 0, "total_pages": 0, "results": []}"#)
            .expect("Should parse empty response");
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_parse_response_rejects_malformed_body() {
        let result = parse_response("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(SearchError::Parse(_))));
    }

    #[test]
    fn test_parse_response_rejects_missing_total_pages() {
        let result = parse_response(r#"{"results": []}"#);
        assert!(matches!(result, Err(SearchError::Parse(_))));
    }

    #[test]
    fn test_api_error_message_joins_errors() {
        let body = r#"{"errors": ["OAuth error: The access token is invalid", "Try again"]}"#;
        assert_eq!(
            api_error_message(body),
            "OAuth error: The access token is invalid; Try again"
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("Rate Limit Exceeded\n"), "Rate Limit Exceeded");
        assert_eq!(api_error_message(""), "empty response");
    }

    #[test]
    fn test_search_url_and_params() {
        let client = UnsplashClient::new("key123").with_base_url("http://localhost:9000/");
        assert_eq!(client.search_url(), "http://localhost:9000/search/photos");

        let params = client.query_params("red fox", 3);
        assert_eq!(params[0], ("client_id", "key123".to_string()));
        assert_eq!(params[1], ("page", "3".to_string()));
        assert_eq!(params[2], ("per_page", "12".to_string()));
        assert_eq!(params[3], ("query", "red fox".to_string()));
    }

    #[test]
    fn test_default_base_url() {
        let client = UnsplashClient::new("key");
        assert_eq!(client.search_url(), "https://api.unsplash.com/search/photos");
    }

    #[tokio::test]
    async fn test_fetch_page_unreachable_host_is_network_error() {
        // Port 1 on localhost is reserved and refuses connections
        let client = UnsplashClient::new("key").with_base_url("http://127.0.0.1:1");
        let result = client.fetch_page("santa", 1).await;
        assert!(matches!(result, Err(SearchError::Network(_))));
    }
}
