use super::types::WordCounts;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_ALPHABETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]").expect("static pattern is valid"));

// ASCII whitespace only: [\t\n\x0B\f\r ]. A no-break space stays inside its token.
static ASCII_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\s)+").expect("static pattern is valid"));

/// Removes every character outside `a-zA-Z`. Accented letters are dropped, not
/// transliterated.
pub fn strip_non_alphabetic(token: &str) -> String {
    NON_ALPHABETIC.replace_all(token, "").into_owned()
}

/// Lowercases the text, splits it on ASCII whitespace runs and strips each piece down to
/// its ASCII letters. Pieces that end up empty are discarded.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    ASCII_WHITESPACE
        .split(&lowered)
        .map(strip_non_alphabetic)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Counts the surviving tokens of `text`, skipping any token that equals an entry of
/// `exclude` exactly.
pub fn count_words(text: &str, exclude: &[String]) -> WordCounts {
    let excluded: HashSet<&str> = exclude.iter().map(String::as_str).collect();

    let mut counts = WordCounts::new();
    for word in tokenize_words(text) {
        if excluded.contains(word.as_str()) {
            continue;
        }
        counts.record(word);
    }
    counts
}
