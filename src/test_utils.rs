//! Test utilities and fixtures for tunelink tests.
//!
//! This module provides a canned-response [`Transport`], trimmed provider
//! payloads, and config-file helpers to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use tunelink::test_utils::{StubTransport, fixtures};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let transport = StubTransport::new().with("/v1/tracks/", fixtures::SPOTIFY_TRACK);
//!     let fetcher = Fetcher::new(Arc::new(transport));
//!     // ... test logic
//! }
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::fetch::{FetchError, PreparedRequest, Transport};

/// Transport answering from a table of URL substrings.
///
/// The first route whose pattern is contained in the request URL wins.
/// Requests with no matching route fail as if the network were down.
#[derive(Default)]
pub struct StubTransport {
    routes: Vec<(String, String)>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `pattern` with `body`.
    pub fn with(mut self, pattern: &str, body: &str) -> Self {
        self.routes.push((pattern.to_string(), body.to_string()));
        self
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        self.routes
            .iter()
            .find(|(pattern, _)| request.url.contains(pattern.as_str()))
            .map(|(_, body)| body.clone())
            .ok_or_else(|| FetchError::Unavailable(format!("connection refused: {}", request.url)))
    }
}

/// Writes `contents` to a `config.toml` in a fresh temporary directory.
///
/// Keep the `TempDir` alive for the duration of your test.
pub fn temp_config(contents: &str) -> (PathBuf, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("Failed to write config");
    (path, dir)
}

/// Trimmed provider payloads.
pub mod fixtures {
    pub const SPOTIFY_TRACK: &str = r#"{
        "id": "0DiWol3AO6WpXZgp0goxAV",
        "name": "One More Time",
        "popularity": 74,
        "album": {
            "id": "2noRn2Aes5aoNVsU6iWThc",
            "name": "Discovery",
            "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}],
            "images": [
                {"url": "https://i.scdn.co/image/discovery-640", "height": 640, "width": 640},
                {"url": "https://i.scdn.co/image/discovery-300", "height": 300, "width": 300}
            ],
            "external_urls": {"spotify": "https://open.spotify.com/album/2noRn2Aes5aoNVsU6iWThc"}
        },
        "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}],
        "external_urls": {"spotify": "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"}
    }"#;

    pub const SPOTIFY_ALBUM: &str = r#"{
        "id": "2noRn2Aes5aoNVsU6iWThc",
        "name": "Discovery",
        "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}],
        "images": [{"url": "https://i.scdn.co/image/discovery-640"}],
        "external_urls": {"spotify": "https://open.spotify.com/album/2noRn2Aes5aoNVsU6iWThc"}
    }"#;

    pub const SPOTIFY_TRACK_SEARCH: &str = r#"{
        "tracks": {
            "total": 2,
            "items": [
                {
                    "id": "2cGxRwrMyEAp8dEbuZaVv6",
                    "name": "Instant Crush",
                    "popularity": 40,
                    "album": {"name": "Random Access Memories", "images": []},
                    "artists": [{"name": "Daft Punk"}],
                    "external_urls": {"spotify": "https://open.spotify.com/track/2cGxRwrMyEAp8dEbuZaVv6"}
                },
                {
                    "id": "69kOkLUCkxIZYexIgSG8rq",
                    "name": "Get Lucky",
                    "popularity": 80,
                    "album": {"name": "Random Access Memories", "images": []},
                    "artists": [{"name": "Daft Punk"}],
                    "external_urls": {"spotify": "https://open.spotify.com/track/69kOkLUCkxIZYexIgSG8rq"}
                }
            ]
        }
    }"#;

    pub const SPOTIFY_ALBUM_SEARCH: &str = r#"{
        "albums": {
            "total": 1,
            "items": [
                {
                    "id": "2noRn2Aes5aoNVsU6iWThc",
                    "name": "Discovery",
                    "images": [{"url": "big"}, {"url": "medium"}],
                    "external_urls": {"spotify": "https://open.spotify.com/album/2noRn2Aes5aoNVsU6iWThc"}
                }
            ]
        }
    }"#;

    pub const DEEZER_TRACK: &str = r#"{
        "id": 3135556,
        "title": "Harder, Better, Faster, Stronger",
        "link": "https://www.deezer.com/track/3135556",
        "artist": {"id": 27, "name": "Daft Punk", "picture": "https://api.deezer.com/artist/27/image"},
        "album": {"id": 302127, "title": "Discovery", "cover": "https://api.deezer.com/album/302127/image"}
    }"#;

    pub const DEEZER_TRACK_SEARCH: &str = r#"{
        "data": [
            {
                "id": 3135553,
                "title": "One More Time",
                "link": "https://www.deezer.com/track/3135553",
                "artist": {"id": 27, "name": "Daft Punk"},
                "album": {"id": 302127, "title": "Discovery", "cover": "https://api.deezer.com/album/302127/image"}
            },
            {
                "id": 3135554,
                "title": "Digital Love",
                "link": "https://www.deezer.com/track/3135554",
                "artist": {"id": 27, "name": "Daft Punk"},
                "album": {"id": 302127, "title": "Discovery"}
            }
        ],
        "total": 2
    }"#;

    pub const QOBUZ_TRACK: &str = r#"{
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

    pub const QOBUZ_ALBUM_SEARCH: &str = r#"{
        "query": "discovery",
        "albums": {
            "limit": 10,
            "offset": 0,
            "total": 2,
            "items": [
                {
                    "id": "0724384960650",
                    "title": "Discovery",
                    "artist": {"id": 36819, "name": "Daft Punk"},
                    "image": {"small": "https://static.qobuz.com/images/covers/50/06/0724384960650_230.jpg"}
                },
                {
                    "id": "0724384260958",
                    "title": "Homework",
                    "artist": {"id": 36819, "name": "Daft Punk"},
                    "image": {"small": "https://static.qobuz.com/images/covers/58/09/0724384260958_230.jpg"}
                }
            ]
        }
    }"#;

    pub const TIDAL_TRACK: &str = r#"{
        "id": 56262911,
        "title": "Get Lucky (feat. Pharrell Williams)",
        "url": "http://www.tidal.com/track/56262911",
        "artist": {"id": 8847, "name": "Daft Punk"},
        "album": {"id": 77646168, "title": "Random Access Memories", "cover": "9a2a4a2b-f5ce"}
    }"#;

    pub const TIDAL_TRACK_SEARCH: &str = r#"{
        "limit": 10,
        "offset": 0,
        "totalNumberOfItems": 1,
        "items": [
            {
                "id": 56262911,
                "title": "Get Lucky (feat. Pharrell Williams)",
                "url": "http://www.tidal.com/track/56262911",
                "artist": {"id": 8847, "name": "Daft Punk"},
                "album": {"id": 77646168, "title": "Random Access Memories", "cover": "9a2a4a2b-f5ce"}
            }
        ]
    }"#;

    pub const SEVENDIGITAL_TRACK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<response status="ok" version="1.2">
  <track id="1234567">
    <title>Something About Us</title>
    <version></version>
    <artist id="2"><name>Daft Punk</name><appearsAs>Daft Punk</appearsAs></artist>
    <release id="98765">
      <title>Discovery</title>
      <image>http://cdn.7static.com/static/img/sleeveart/00/000/987/0000098765_50.jpg</image>
      <url>https://www.7digital.com/artist/daft-punk/release/discovery-98765</url>
    </release>
    <url>https://www.7digital.com/artist/daft-punk/release/discovery-98765?t=1234567</url>
  </track>
</response>"#;

    pub const SEVENDIGITAL_RELEASE_SEARCH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<response status="ok" version="1.2">
  <searchResults>
    <page>1</page>
    <pageSize>10</pageSize>
    <totalItems>2</totalItems>
    <searchResult>
      <type>release</type>
      <score>2</score>
      <release id="1">
        <title>Alive 1997</title>
        <artist id="2"><name>Daft Punk</name></artist>
        <url>https://www.7digital.com/artist/daft-punk/release/alive-1997-1</url>
      </release>
    </searchResult>
    <searchResult>
      <type>release</type>
      <score>4</score>
      <release id="2">
        <title>Alive 2007</title>
        <artist id="2"><name>Daft Punk</name></artist>
        <url>https://www.7digital.com/artist/daft-punk/release/alive-2007-2</url>
      </release>
    </searchResult>
  </searchResults>
</response>"#;
}
