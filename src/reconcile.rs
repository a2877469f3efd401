//! Bulk classification of pasted tokens

use crate::collection::EmailCollection;
use crate::normalize::{is_valid_syntax, normalize};
use crate::types::{InvitedSet, ReconciliationResult};
use indexmap::IndexSet;
use tracing::debug;

/// Classify a batch of raw tokens and append the new ones to `collection`.
///
/// Invalid tokens are counted and dropped before any duplicate check. Valid
/// tokens are de-duplicated among themselves first, so repeats inside one
/// paste are neither added twice nor reported as skipped. One rejected token
/// never blocks the others.
pub fn reconcile<S: AsRef<str>>(
    raw_tokens: &[S],
    collection: &mut EmailCollection,
    invited: &InvitedSet,
) -> ReconciliationResult {
    let mut result = ReconciliationResult::default();
    let mut unique: IndexSet<String> = IndexSet::new();

    for email in raw_tokens.iter().filter_map(|t| normalize(t.as_ref())) {
        if is_valid_syntax(&email) {
            unique.insert(email);
        } else {
            result.invalid += 1;
        }
    }

    let mut staged = Vec::with_capacity(unique.len());
    for email in unique {
        if collection.contains(&email) {
            result.skipped_in_input += 1;
        } else if invited.contains(&email) {
            result.skipped_invited += 1;
        } else {
            staged.push(email);
        }
    }

    result.added = staged.len();
    for email in staged {
        collection.push_checked(email);
    }

    debug!(
        "Bulk add: {} added, {} invalid, {} already in list, {} already invited",
        result.added, result.invalid, result.skipped_in_input, result.skipped_invited
    );

    result
}
