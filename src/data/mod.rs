//! Core data models for Photogrid
//!
//! This module contains the records shown in the grid and the client that
//! fetches them from the Unsplash photo search API.

pub mod unsplash;

pub use unsplash::{ImageSearch, SearchError, UnsplashClient};

use serde::{Deserialize, Serialize};

/// Number of results requested per page
pub const PAGE_SIZE: u32 = 12;

/// Highest page number the search API will serve
pub const MAX_TOTAL_PAGES: u32 = 200;

/// Query used until the user submits a search of their own
pub const DEFAULT_QUERY: &str = "santa";

/// A single image returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Unsplash photo id, unique within a page
    pub id: String,
    /// Small preview image URL
    pub thumbnail_url: String,
    /// Accessibility text supplied by the photographer, if any
    pub alt_description: Option<String>,
    /// Display name of the photographer
    pub author_name: String,
    /// Free-form description, if any
    pub description: Option<String>,
    /// Link to the photo page on unsplash.com, if the API supplied one
    #[serde(default)]
    pub page_url: Option<String>,
}

impl ImageResult {
    /// Text shown in the body of a card
    ///
    /// Falls back to the alt text when there is no description, since many
    /// photos only carry one of the two.
    pub fn caption(&self) -> Option<&str> {
        fn non_blank(text: &Option<String>) -> Option<&str> {
            text.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        non_blank(&self.description).or_else(|| non_blank(&self.alt_description))
    }

    /// URL to open when the user asks to view the image
    pub fn open_url(&self) -> &str {
        self.page_url.as_deref().unwrap_or(&self.thumbnail_url)
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResultPage {
    /// Results in API order
    pub results: Vec<ImageResult>,
    /// Total pages reported by the API, clamped to `MAX_TOTAL_PAGES`
    pub total_pages: u32,
}

/// Clamps an API-reported page count to what the API will actually serve
pub fn clamp_total_pages(reported: u32) -> u32 {
    reported.min(MAX_TOTAL_PAGES)
}
