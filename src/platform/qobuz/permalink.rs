//! Qobuz URL shapes, in priority order:
//!
//! - track: `open.qobuz.com/track/23860968`, `player.qobuz.com/#!/track/23860968`,
//!   `play.qobuz.com/album/0060254728697?track=23860968`
//! - album: `open.qobuz.com/album/0060254728697`, `player.qobuz.com/#!/album/0060254728859`,
//!   `www.qobuz.com/fr-fr/album/<slug>/0060254728697`
//! - artist: `play.qobuz.com/artist/36819`, `player.qobuz.com/#!/artist/2131688`

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::permalink::{Permalink, capture, without_query};

static TRACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/track/([0-9]+)/?$").expect("valid regex"));

static ALBUM_TRACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/album/[A-Za-z0-9]+/?\?track=([0-9]+)/?$").expect("valid regex")
});

static ALBUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/album/([A-Za-z0-9]+)/?$").expect("valid regex"));

static ALBUM_SITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/album/[^/]+/([A-Za-z0-9]+)/?$").expect("valid regex"));

static ARTIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/artist/([0-9]+)/?$").expect("valid regex"));

pub fn has_permalink(url: &str) -> bool {
    url.contains("qobuz.com")
}

pub fn parse(url: &str) -> Option<Permalink> {
    // The only shape that keeps its query string
    if let Some(id) = capture(&ALBUM_TRACK, url) {
        return Some(Permalink::Track(id));
    }

    let url = without_query(url);
    capture(&TRACK, url)
        .map(Permalink::Track)
        .or_else(|| capture(&ALBUM, url).map(Permalink::Album))
        .or_else(|| capture(&ALBUM_SITE, url).map(Permalink::Album))
        .or_else(|| capture(&ARTIST, url).map(Permalink::Artist))
}
