//! Spotify URL shapes, in priority order:
//!
//! - `https://open.spotify.com/track/5jhJur5n4fasblLSCOcrTp` (also `album`,
//!   `artist`, `play.spotify.com`, `spotify:track:<id>` URIs, `?si=` suffix)
//! - `http://open.spotify.com/local/<artist>/<album>/<track>/<seconds>`

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::permalink::{Permalink, segment_words, without_query};

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(artist|album|track)[:/]([A-Za-z0-9]+)/?$").expect("valid regex")
});

static LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"local/([^/]+)/([^/]*)/([^/]+)/[0-9]+$").expect("valid regex")
});

pub fn has_permalink(url: &str) -> bool {
    url.contains("spotify:") || url.contains("open.spotify.") || url.contains("play.spotify.")
}

pub fn parse(url: &str) -> Option<Permalink> {
    let url = without_query(url);

    if let Some(c) = ENTITY.captures(url) {
        let id = c[2].to_string();
        return Some(match &c[1] {
            "track" => Permalink::Track(id),
            "album" => Permalink::Album(id),
            _ => Permalink::Artist(id),
        });
    }

    LOCAL.captures(url).map(|c| {
        Permalink::Words(vec![segment_words(&c[1], false), segment_words(&c[3], false)])
    })
}
