//! Deezer API Data Transfer Objects
//!
//! These types match what api.deezer.com returns.
//! DO NOT use these types outside the deezer module - convert to domain types.
//!
//! API Reference: https://developers.deezer.com/api
//!
//! Deezer answers errors with HTTP 200 and an `error` object, e.g.
//! `{"error": {"type": "DataException", "message": "no data", "code": 800}}`.

use serde::{Deserialize, Serialize};

use crate::platform::{null_as_default, string_or_number};

/// Deezer's "no data" error code
pub const NO_DATA: u32 = 800;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub error_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    pub code: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Artist {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    pub picture: Option<String>,
}

/// Album as embedded in a track
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AlbumRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub cover: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Track {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    pub artist: Option<Artist>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Album {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    pub cover: Option<String>,
    pub artist: Option<Artist>,
}

/// `/search/track` and `/search/album` response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
}

impl<T> Default for SearchResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}
