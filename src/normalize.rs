//! Email normalization and syntax validation

use regex::Regex;

static EMAIL_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Trim and lowercase a raw token.
///
/// Returns `None` when nothing is left after trimming, which callers treat
/// as "no token" rather than as an invalid email.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Check an email against the `local@domain.tld` pattern
///
/// The local part allows letters, digits and `._%+-`, the domain allows
/// letters, digits, `.` and `-`, and the top-level domain needs at least two
/// letters.
#[must_use]
pub fn is_valid_syntax(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
