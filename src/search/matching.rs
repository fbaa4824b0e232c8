//! Deciding when hits from different platforms are the same song or album.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::MusicalEntity;

static FEATURING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[\s(\[]+(feat\.?|ft\.?|featuring)\s.*$").expect("valid regex")
});

/// Grouping key strategy for aggregate search.
///
/// Two hits belong to the same aggregated entity exactly when their keys
/// are equal. A hit without a key is never grouped with another one.
pub trait EntityMatcher: Send + Sync {
    fn key(&self, entity: &MusicalEntity) -> Option<String>;
}

/// Case-folded, punctuation-free `(kind, artist, safe title)` equality.
///
/// Featuring credits are dropped from both artist and title, so
/// `"Daft Punk feat. Pharrell"` / `"Get Lucky (feat. Pharrell)"` and
/// `"daft punk"` / `"Get Lucky"` share a key.
///
/// Hits with no artist (lazy album pages) get no key: a shared title alone
/// would fold different albums into one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedMatcher;

impl EntityMatcher for NormalizedMatcher {
    fn key(&self, entity: &MusicalEntity) -> Option<String> {
        let artist = normalize(entity.artist());
        if artist.is_empty() {
            return None;
        }
        Some(format!(
            "{}|{}|{}",
            entity.kind_name(),
            artist,
            normalize(entity.safe_title())
        ))
    }
}

/// Lowercase, strip featuring credits, reduce punctuation runs to a space.
pub fn normalize(text: &str) -> String {
    let text = FEATURING.replace(text, "");
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c == '&' {
            pending_space = !out.is_empty();
            push_word(&mut out, &mut pending_space, "and");
        } else if c.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        } else if c != '\'' && !out.is_empty() {
            pending_space = true;
        }
    }
    out
}

fn push_word(out: &mut String, pending_space: &mut bool, word: &str) {
    if *pending_space {
        out.push(' ');
    }
    out.push_str(word);
    *pending_space = true;
}
