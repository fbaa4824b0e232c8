//! 7digital API Data Transfer Objects
//!
//! 7digital answers in XML. Bodies are converted to JSON values by
//! `fetch::xml` before decoding, so:
//! - attributes appear as `@name` keys
//! - every leaf is a string (numbers included)
//! - an element repeated once is an object, repeated more is an array
//!
//! DO NOT use these types outside the sevendigital module - convert to domain types.
//!
//! API Reference: https://docs.7digital.com/reference

use serde::{Deserialize, Serialize};

/// A list the XML conversion may have collapsed into a single object.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// `<response status="ok|error">` root
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Envelope {
    pub response: Response,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Response {
    #[serde(rename = "@status")]
    pub status: String,
    pub error: Option<ApiError>,
    pub track: Option<Track>,
    pub release: Option<Release>,
    #[serde(rename = "searchResults")]
    pub search_results: Option<SearchResults>,
}

impl Response {
    pub fn is_error(&self) -> bool {
        self.status == "error" || self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "errorMessage")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Artist {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "appearsAs")]
    pub appears_as: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Release {
    #[serde(rename = "@id")]
    pub id: String,
    pub title: String,
    pub version: String,
    pub artist: Option<Artist>,
    /// Cover image URL
    pub image: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Track {
    #[serde(rename = "@id")]
    pub id: String,
    pub title: String,
    pub version: String,
    pub artist: Option<Artist>,
    pub release: Option<Release>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResults {
    pub page: String,
    #[serde(rename = "pageSize")]
    pub page_size: String,
    #[serde(rename = "totalItems")]
    pub total_items: String,
    #[serde(rename = "searchResult")]
    pub results: OneOrMany<SearchResult>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: String,
    /// Relevance as a decimal string
    pub score: String,
    pub track: Option<Track>,
    pub release: Option<Release>,
}
