//! Finalizing the collection into one submission

use crate::collection::EmailCollection;
use crate::error::SubmitError;
use crate::normalize::normalize;
use crate::types::InvitedSet;
use std::fmt;
use tracing::{debug, warn};

/// Receiver of the final email list
pub trait SubmitSink {
    type Error: fmt::Display;

    /// Deliver a non-empty, de-duplicated, normalized list of emails
    fn submit(
        &mut self,
        emails: Vec<String>,
    ) -> impl Future<Output = std::result::Result<(), Self::Error>>;
}

/// Emails handed out by [`SubmissionCoordinator::prepare`], waiting for the
/// sink to settle
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct SubmissionTicket {
    emails: Vec<String>,
}

impl SubmissionTicket {
    #[must_use]
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.emails.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    #[must_use]
    pub fn into_emails(self) -> Vec<String> {
        self.emails
    }
}

/// Guards a single outstanding submission
#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    in_flight: bool,
}

impl SubmissionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Validate pending text and build the list to submit.
    ///
    /// A non-blank `pending` token must pass the same checks as a single add;
    /// any failure aborts the whole submission. Returns `Ok(None)` when there
    /// is nothing to send. Neither the collection nor the pending text is
    /// touched here.
    pub fn prepare(
        &mut self,
        collection: &EmailCollection,
        pending: &str,
        invited: &InvitedSet,
    ) -> Result<Option<SubmissionTicket>, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InProgress);
        }

        let mut emails = collection.valid_emails();
        if let Some(candidate) = normalize(pending) {
            collection.check_candidate(&candidate, invited)?;
            emails.push(candidate);
        }

        if emails.is_empty() {
            return Ok(None);
        }

        debug!("Submitting {} emails", emails.len());
        self.in_flight = true;
        Ok(Some(SubmissionTicket { emails }))
    }

    /// Record the sink outcome for `ticket` and return the submitted count
    #[allow(clippy::needless_pass_by_value)]
    pub fn settle<E: fmt::Display>(
        &mut self,
        ticket: SubmissionTicket,
        outcome: std::result::Result<(), E>,
    ) -> Result<usize, SubmitError> {
        if !self.in_flight {
            warn!("Ignoring outcome for a submission that is not in flight");
            return Err(SubmitError::StaleTicket);
        }
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                debug!("Submission of {} emails succeeded", ticket.len());
                Ok(ticket.len())
            }
            Err(e) => {
                warn!("Submission of {} emails failed: {e}", ticket.len());
                Err(SubmitError::Failed(e.to_string()))
            }
        }
    }

    /// Give up on `ticket` without an outcome, e.g. when the caller stopped
    /// waiting for the sink
    #[allow(clippy::needless_pass_by_value)]
    pub fn abandon(&mut self, ticket: SubmissionTicket) {
        if self.in_flight {
            warn!("Submission of {} emails abandoned before settling", ticket.len());
            self.in_flight = false;
        }
    }
}
