//! Deezer URL shapes, in priority order:
//!
//! - track: `deezer.com/listen-10236179`, `deezer.com/music/track/10240179`,
//!   `deezer.com/fr/track/10444623`
//! - album: `deezer.com/fr/album/955330`
//! - artist: `deezer.com/fr/music/radiohead`, `deezer.com/fr/artist/16948`

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::permalink::{Permalink, capture, without_query};

static TRACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:listen-|music/track/|/track/)([0-9]+)/?$").expect("valid regex")
});

static ALBUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/album/([0-9]+)/?$").expect("valid regex"));

static ARTIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:music|artist)/([^/]+)/?$").expect("valid regex"));

pub fn has_permalink(url: &str) -> bool {
    url.contains("deezer.")
}

pub fn parse(url: &str) -> Option<Permalink> {
    let url = without_query(url);

    capture(&TRACK, url)
        .map(Permalink::Track)
        .or_else(|| capture(&ALBUM, url).map(Permalink::Album))
        .or_else(|| capture(&ARTIST, url).map(Permalink::Artist))
}
