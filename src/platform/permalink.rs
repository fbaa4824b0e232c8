//! Shared helpers for recognising provider URLs.

use regex::Regex;

/// What a provider URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permalink {
    Track(String),
    Album(String),
    Artist(String),
    /// Recognised shape that carries its own search words (no lookup)
    Words(Vec<String>),
}

/// Drop the query string and fragment (`?si=...`, `#play`).
///
/// A hash-bang (`player.qobuz.com/#!/track/1`) routes inside older web
/// players and is kept as part of the path.
pub fn without_query(url: &str) -> &str {
    let end = url
        .match_indices(['?', '#'])
        .find(|&(i, mark)| mark == "?" || !url[i + 1..].starts_with('!'))
        .map_or(url.len(), |(i, _)| i);
    &url[..end]
}

/// First capture group of `re` in `url`.
pub fn capture(re: &Regex, url: &str) -> Option<String> {
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Turn a URL path segment into plain words (`hang+the%20bastard` ->
/// `hang the bastard`, `daft-punk` -> `daft punk` when `dashes` is set).
pub fn segment_words(segment: &str, dashes: bool) -> String {
    let plus_free = segment.replace('+', " ");
    let decoded = urlencoding::decode(&plus_free)
        .map(|s| s.into_owned())
        .unwrap_or(plus_free);
    let decoded = if dashes {
        decoded.replace('-', " ")
    } else {
        decoded
    };
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
