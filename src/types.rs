//! Core types shared by the chip engine

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One email token held in the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EmailChip {
    /// Normalized (trimmed, lowercased) address
    pub email: String,

    /// Whether the address passed syntax validation
    pub is_valid: bool,
}

impl EmailChip {
    pub fn new(email: impl Into<String>, is_valid: bool) -> Self {
        Self {
            email: email.into(),
            is_valid,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for EmailChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Emails of users that were already invited elsewhere.
///
/// The caller builds a fresh snapshot for every operation; the engine only
/// queries it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitedSet {
    emails: HashSet<String>,
}

impl InvitedSet {
    /// Build a snapshot, normalizing every entry and dropping blanks
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .filter_map(|email| normalize(email.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        normalize(email).is_some_and(|email| self.emails.contains(&email))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for InvitedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Counts produced by one bulk add
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// Chips appended to the collection
    pub added: usize,

    /// Tokens rejected for bad syntax
    pub invalid: usize,

    /// Valid tokens already present as chips
    pub skipped_in_input: usize,

    /// Valid tokens belonging to already invited users
    pub skipped_invited: usize,
}

impl ReconciliationResult {
    #[must_use]
    pub const fn skipped_total(&self) -> usize {
        self.skipped_in_input + self.skipped_invited
    }

    /// True when nothing was added, skipped or rejected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.added == 0 && self.invalid == 0 && self.skipped_total() == 0
    }
}
