//! Qobuz API Data Transfer Objects
//!
//! These types match what the Qobuz `api.json/0.2` endpoints return.
//! DO NOT use these types outside the qobuz module - convert to domain types.
//!
//! Errors come back as `{"status": "error", "code": 404, "message": "..."}`.

use serde::{Deserialize, Serialize};

use crate::platform::{null_as_default, string_or_number};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub status: Option<String>,
    pub code: Option<u32>,
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Image {
    pub small: Option<String>,
    pub thumbnail: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Artist {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Sometimes `null` in search results
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Album {
    /// Alphanumeric (UPC-like) id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub artist: Option<Artist>,
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Track {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub album: Option<Album>,
    pub performer: Option<Artist>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit: 0,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub query: String,
    pub tracks: Option<Page<Track>>,
    pub albums: Option<Page<Album>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_response() {
        let json = r#"{
            "id": 1034567,
            "title": "Veridis Quo",
            "performer": {"id": 36819, "name": "Daft Punk"},
            "album": {
                "id": "0724384960650",
                "title": "Discovery",
                "artist": {"id": 36819, "name": "Daft Punk"},
                "image": {"small": "https://static.qobuz.com/images/covers/50/06/0724384960650_230.jpg"}
            }
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        let album = track.album.unwrap();

        assert_eq!(track.id, "1034567");
        assert_eq!(album.id, "0724384960650");
        assert_eq!(album.artist.unwrap().name.as_deref(), Some("Daft Punk"));
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"status": "error", "code": 404, "message": "No result matching given argument"}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();

        assert!(response.is_error());
        assert_eq!(response.code, Some(404));
    }

    #[test]
    fn test_parse_null_artist_name() {
        let json = r#"{"tracks": {"items": [{"id": 1, "title": "t", "album": {"id": "a", "title": "b", "artist": {"id": 2, "name": null}}}], "total": 1}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let track = &response.tracks.unwrap().items[0];
        assert!(track.album.as_ref().unwrap().artist.as_ref().unwrap().name.is_none());
    }
}
