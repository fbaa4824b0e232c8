//! Tidal API Data Transfer Objects
//!
//! These types match what the Tidal v1 API returns.
//! DO NOT use these types outside the tidal module - convert to domain types.
//!
//! Errors look like `{"status": 404, "subStatus": 2001, "userMessage": "..."}`.
//! Entity bodies never carry a `status` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::{null_as_default, string_or_number};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP-like code, occasionally the string `"error"`
    pub status: Option<Value>,
    pub sub_status: Option<u32>,
    pub user_message: Option<String>,
}

impl ErrorResponse {
    pub fn is_error(&self) -> bool {
        self.status.as_ref().is_some_and(|s| !s.is_null())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Artist {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Album as embedded in a track
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AlbumRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Image hash such as `"a1b2c3d4-..."`
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
    pub url: String,
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
    pub url: String,
    pub cover: Option<String>,
    pub artist: Option<Artist>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub items: Vec<T>,
    pub total_number_of_items: u64,
}

impl<T> Default for SearchResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_number_of_items: 0,
        }
    }
}
