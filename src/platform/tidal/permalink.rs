//! Tidal URL shapes, in priority order:
//!
//! - track: `tidal.com/track/56262911`, `listen.tidal.com/album/1/track/56262911`
//! - album: `tidal.com/browse/album/77646168`
//! - artist: `tidal.com/artist/8847`

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::permalink::{Permalink, capture, without_query};

static TRACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"track/([0-9]+)/?$").expect("valid regex"));

static ALBUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/album/([0-9]+)/?$").expect("valid regex"));

static ARTIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"artist/([^/]+)/?$").expect("valid regex"));

pub fn has_permalink(url: &str) -> bool {
    url.contains("tidal.") || url.contains("tidalhifi.")
}

pub fn parse(url: &str) -> Option<Permalink> {
    let url = without_query(url);

    capture(&TRACK, url)
        .map(Permalink::Track)
        .or_else(|| capture(&ALBUM, url).map(Permalink::Album))
        .or_else(|| capture(&ARTIST, url).map(Permalink::Artist))
}
