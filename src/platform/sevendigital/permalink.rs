//! 7digital URL shapes, in priority order:
//!
//! - track: `previews.7digital.com/clip/8464021`
//! - album: `www.7digital.com/artist/daft-punk/release/discovery-98765`
//! - artist: `www.7digital.com/artist/daft-punk` (slug only, no lookup)

use std::sync::LazyLock;

use regex::Regex;

use crate::platform::permalink::{Permalink, capture, segment_words, without_query};

static TRACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"previews\.7digital\.com/clip/([0-9]+)").expect("valid regex"));

static ALBUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/artist/[^/]+/release/[^/]*?-?([0-9]+)/?$").expect("valid regex")
});

static ARTIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/artist/([^/]+)/?$").expect("valid regex"));

pub fn has_permalink(url: &str) -> bool {
    url.contains("7digital.com")
}

pub fn parse(url: &str) -> Option<Permalink> {
    let url = without_query(url);

    capture(&TRACK, url)
        .map(Permalink::Track)
        .or_else(|| capture(&ALBUM, url).map(Permalink::Album))
        .or_else(|| capture(&ARTIST, url).map(|slug| Permalink::Words(vec![segment_words(&slug, true)])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clip() {
        assert_eq!(
            parse("http://previews.7digital.com/clip/8464021"),
            Some(Permalink::Track("8464021".into()))
        );
    }

    #[test]
    fn test_parse_release() {
        assert_eq!(
            parse("https://www.7digital.com/artist/daft-punk/release/discovery-98765"),
            Some(Permalink::Album("98765".into()))
        );
        assert_eq!(
            parse("https://uk.7digital.com/artist/daft-punk/release/random-access-memories-2348871/"),
            Some(Permalink::Album("2348871".into()))
        );
    }

    #[test]
    fn test_parse_artist_slug() {
        assert_eq!(
            parse("https://www.7digital.com/artist/daft-punk"),
            Some(Permalink::Words(vec!["daft punk".into()]))
        );
    }

    #[test]
    fn test_parse_unknown_shape() {
        assert_eq!(parse("https://www.7digital.com/"), None);
    }
}
