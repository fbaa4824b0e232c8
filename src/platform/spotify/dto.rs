//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify Web API returns.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api

use serde::{Deserialize, Serialize};

use crate::platform::null_as_default;

/// Error envelope, e.g. `{"error": {"status": 400, "message": "invalid id"}}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiError {
    pub status: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Simplified artist object
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Artist {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Album object. Search results return the simplified form, which may
/// lack `artists`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Album {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
    /// Largest first: 640, 300, 64
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Track {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub album: Option<Album>,
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
    /// 0..=100
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Client-credentials grant answer. Refusals carry `error` and
/// `error_description` instead of a token.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,
    /// Seconds
    pub expires_in: u64,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `/search` response; only the requested type is present.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub albums: Option<Paging<Album>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed `/tracks/{id}` response
    const TRACK_RESPONSE: &str = r#"{
        "id": "0DiWol3AO6WpXZgp0goxAV",
        "name": "One More Time",
        "popularity": 74,
        "album": {
            "id": "2noRn2Aes5aoNVsU6iWThc",
            "name": "Discovery",
            "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}],
            "images": [
                {"url": "https://i.scdn.co/image/640", "height": 640, "width": 640},
                {"url": "https://i.scdn.co/image/300", "height": 300, "width": 300},
                {"url": "https://i.scdn.co/image/64", "height": 64, "width": 64}
            ],
            "external_urls": {"spotify": "https://open.spotify.com/album/2noRn2Aes5aoNVsU6iWThc"}
        },
        "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}],
        "external_urls": {"spotify": "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"},
        "disc_number": 1,
        "explicit": false
    }"#;

    #[test]
    fn test_parse_track_response() {
        let track: Track = serde_json::from_str(TRACK_RESPONSE).unwrap();

        assert_eq!(track.name, "One More Time");
        assert_eq!(track.popularity, Some(74));
        assert_eq!(track.artists[0].name, "Daft Punk");

        let album = track.album.unwrap();
        assert_eq!(album.name, "Discovery");
        assert_eq!(album.images.len(), 3);
        assert_eq!(
            track.external_urls.spotify.as_deref(),
            Some("https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV")
        );
    }

    #[test]
    fn test_parse_album_search_without_artists() {
        let json = r#"{"albums": {"items": [{"id": "a", "name": "Homework", "images": []}], "total": 1}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let albums = response.albums.unwrap();
        assert_eq!(albums.total, 1);
        assert!(albums.items[0].artists.is_empty());
        assert!(response.tracks.is_none());
    }

    #[test]
    fn test_explicit_nulls_default() {
        let json = r#"{"tracks": {"items": [{
            "id": "t",
            "name": "Get Lucky",
            "artists": [{"id": "a", "name": null}],
            "album": {"id": "b", "name": null, "artists": null, "images": [{"url": null, "height": null}]},
            "external_urls": null
        }], "total": 1}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let track = &response.tracks.unwrap().items[0];
        assert_eq!(track.name, "Get Lucky");
        assert_eq!(track.artists[0].name, "");
        assert!(track.external_urls.spotify.is_none());

        let album = track.album.as_ref().unwrap();
        assert_eq!(album.name, "");
        assert!(album.artists.is_empty());
        assert_eq!(album.images[0].url, "");
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"error": {"status": 400, "message": "invalid id"}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.status, 400);
        assert_eq!(error.message, "invalid id");
    }

    #[test]
    fn test_entity_body_has_no_error() {
        let response: ErrorResponse = serde_json::from_str(TRACK_RESPONSE).unwrap();
        assert!(response.error.is_none());
    }
}
