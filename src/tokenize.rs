//! Splitting pasted text into candidate tokens

use regex::Regex;

static DELIMITER_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[,;\s]+").unwrap());

/// Split pasted text on runs of commas, semicolons and whitespace.
///
/// Empty fragments are dropped, so blank input yields no tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    DELIMITER_REGEX
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}
