//! Ordered, de-duplicating set of email chips

use crate::error::{AddError, Result};
use crate::normalize::{is_valid_syntax, normalize};
use crate::types::{EmailChip, InvitedSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chips in the order they were added.
///
/// Duplicates are rejected before insertion, so no two chips ever share an
/// email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCollection {
    chips: Vec<EmailChip>,
}

impl EmailCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection from an initial list.
    ///
    /// Seeds skip the invited check and are kept even when their syntax is
    /// invalid; such chips are flagged with `is_valid == false`.
    pub fn with_initial<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collection = Self::new();
        for email in emails.into_iter().filter_map(|e| normalize(e.as_ref())) {
            if !collection.contains(&email) {
                let is_valid = is_valid_syntax(&email);
                collection.chips.push(EmailChip::new(email, is_valid));
            }
        }
        collection
    }

    /// Run the duplicate, invited and syntax checks in that order.
    ///
    /// `email` must already be normalized.
    pub fn check_candidate(&self, email: &str, invited: &InvitedSet) -> Result<()> {
        if self.contains(email) {
            return Err(AddError::DuplicateInList {
                email: email.to_string(),
            });
        }
        if invited.contains(email) {
            return Err(AddError::AlreadyInvited {
                email: email.to_string(),
            });
        }
        if !is_valid_syntax(email) {
            return Err(AddError::InvalidSyntax {
                email: email.to_string(),
            });
        }
        Ok(())
    }

    /// Normalize, check and append a single email.
    ///
    /// Blank input is a no-op and returns `Ok(None)`.
    pub fn add_one(&mut self, raw: &str, invited: &InvitedSet) -> Result<Option<String>> {
        let Some(email) = normalize(raw) else {
            return Ok(None);
        };

        self.check_candidate(&email, invited)?;

        debug!("Added email chip: {email}");
        self.chips.push(EmailChip::new(email.clone(), true));
        Ok(Some(email))
    }

    /// Append a chip that the caller has already checked
    pub(crate) fn push_checked(&mut self, email: String) {
        self.chips.push(EmailChip::new(email, true));
    }

    /// Remove a chip by email, returning whether anything was removed
    pub fn remove(&mut self, email: &str) -> bool {
        let Some(email) = normalize(email) else {
            return false;
        };
        let before = self.chips.len();
        self.chips.retain(|chip| chip.email != email);
        let removed = self.chips.len() != before;
        if removed {
            debug!("Removed email chip: {email}");
        }
        removed
    }

    /// Drop the most recently added chip
    pub fn remove_last(&mut self) -> Option<EmailChip> {
        let chip = self.chips.pop();
        if let Some(ref chip) = chip {
            debug!("Removed last email chip: {}", chip.email);
        }
        chip
    }

    pub fn clear(&mut self) {
        self.chips.clear();
    }

    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        normalize(email).is_some_and(|email| self.chips.iter().any(|chip| chip.email == email))
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.chips.iter().filter(|chip| chip.is_valid).count()
    }

    #[must_use]
    pub fn valid_emails(&self) -> Vec<String> {
        self.chips
            .iter()
            .filter(|chip| chip.is_valid)
            .map(|chip| chip.email.clone())
            .collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&EmailChip> {
        self.chips.last()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.chips.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EmailChip] {
        &self.chips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmailChip> {
        self.chips.iter()
    }

    /// Emails in insertion order
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.chips.iter().map(EmailChip::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a EmailCollection {
    type Item = &'a EmailChip;
    type IntoIter = std::slice::Iter<'a, EmailChip>;

    fn into_iter(self) -> Self::IntoIter {
        self.chips.iter()
    }
}
