//! Title normalization used to build search query terms.

use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(\([^)]*\)|\[[^\]]*\])").expect("valid regex"));

static FEATURING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(feat\.?|ft\.|featuring)\s+.*$").expect("valid regex"));

static EDITION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+-\s+[^-]*\b(remaster(ed)?|live|version|edit|mix|mono|stereo|deluxe|bonus)\b.*$",
    )
    .expect("valid regex")
});

/// Strip edition and featuring noise from a title.
///
/// `"Get Lucky (feat. Pharrell) - Radio Edit"` becomes `"Get Lucky"`.
/// Falls back to the trimmed input if nothing would be left.
pub fn safe_title(title: &str) -> String {
    let stripped = BRACKETED.replace_all(title, "");
    let stripped = EDITION_SUFFIX.replace(&stripped, "");
    let stripped = FEATURING.replace(&stripped, "");

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        title.trim().to_string()
    } else {
        collapsed
    }
}
