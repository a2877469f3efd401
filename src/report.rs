//! User-facing outcome reporting

use crate::types::ReconciliationResult;
use serde::{Deserialize, Serialize};

/// Hooks for surfacing outcomes to the user.
///
/// Every method defaults to doing nothing. Exactly one of the single-add
/// hooks fires per rejected chip, and `on_success` fires once per settled
/// submission.
pub trait InviteReporter {
    fn on_success(&mut self, _count: usize) {}

    fn on_duplicate_in_list(&mut self) {}

    fn on_already_invited(&mut self) {}

    fn on_invalid_email(&mut self) {}

    fn on_submit_failed(&mut self, _message: &str) {}
}

/// Reporter that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl InviteReporter for NoopReporter {}

/// Tone of a bulk add summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryVariant {
    Success,
    Info,
}

/// One message describing a whole bulk add
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub message: String,
    pub variant: SummaryVariant,
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

impl ReconciliationResult {
    /// Format the counts into a single message
    #[must_use]
    pub fn summary(&self) -> BulkSummary {
        if self.added > 0 {
            let mut parts = Vec::new();
            if self.invalid > 0 {
                parts.push(format!("{} skipped", plural(self.invalid, "invalid")));
            }
            if self.skipped_in_input > 0 {
                parts.push(plural(self.skipped_in_input, "already in list"));
            }
            if self.skipped_invited > 0 {
                parts.push(plural(self.skipped_invited, "already invited"));
            }

            let mut message = format!("Added {}", plural(self.added, "email"));
            if !parts.is_empty() {
                message.push_str(". ");
                message.push_str(&parts.join(". "));
            }
            return BulkSummary {
                message,
                variant: SummaryVariant::Success,
            };
        }

        if self.skipped_total() > 0 || self.invalid > 0 {
            let mut parts = Vec::new();
            if self.skipped_in_input > 0 {
                parts.push(format!(
                    "{} already in list",
                    plural(self.skipped_in_input, "valid email")
                ));
            }
            if self.skipped_invited > 0 {
                parts.push(format!(
                    "{} already invited",
                    plural(self.skipped_invited, "valid email")
                ));
            }
            if self.invalid > 0 {
                parts.push(format!("{} skipped", plural(self.invalid, "invalid email")));
            }
            return BulkSummary {
                message: parts.join(". "),
                variant: SummaryVariant::Info,
            };
        }

        BulkSummary {
            message: "No valid emails to add.".to_string(),
            variant: SummaryVariant::Info,
        }
    }
}

/// Message shown after a successful submission
#[must_use]
pub fn success_message(count: usize) -> String {
    format!("Sent invites to {}", plural(count, "user"))
}
