//! The chip input engine
//!
//! [`EmailInput`] owns everything behind the invite field: the chip
//! collection, the pending text, keyboard selection, the overflow split and
//! the submission guard. It never measures or renders anything itself; the
//! caller feeds it events and widths and reads back the state to draw.

use crate::collection::EmailCollection;
use crate::config::InputConfig;
use crate::error::{AddError, Result, SubmitError};
use crate::normalize::normalize;
use crate::overflow::{VisibleLimit, max_visible};
use crate::reconcile::reconcile;
use crate::report::{InviteReporter, NoopReporter};
use crate::selection::{BackspaceAction, ChipSelection, Key, LastChip};
use crate::submit::{SubmissionCoordinator, SubmissionTicket, SubmitSink};
use crate::tokenize::tokenize;
use crate::types::{EmailChip, InvitedSet, ReconciliationResult};
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

/// Result of feeding a key press to [`EmailInput::handle_key`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The pending text became a chip
    Added(String),
    /// The pending text was refused
    Rejected(AddError),
    /// The last chip is now selected for deletion
    Armed(String),
    /// A chip was deleted
    Removed(String),
    /// The key did not affect the chips
    Ignored,
}

impl KeyOutcome {
    /// Whether the caller should suppress the key's default text editing
    #[must_use]
    pub const fn prevents_default(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Result of [`EmailInput::handle_paste`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// At most one token; let the text land in the input as typed
    Inline,
    /// Several tokens were reconciled into the collection
    Bulk(ReconciliationResult),
}

/// State behind one invite field.
///
/// `R` receives the user-facing outcomes; it defaults to [`NoopReporter`].
#[derive(Debug)]
pub struct EmailInput<R: InviteReporter = NoopReporter> {
    config: InputConfig,
    collection: EmailCollection,
    input_value: String,
    selection: ChipSelection,
    visible_limit: VisibleLimit,
    popover_open: bool,
    pulse_until: Option<Instant>,
    coordinator: SubmissionCoordinator,
    reporter: R,
}

impl EmailInput<NoopReporter> {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self::with_reporter(config, NoopReporter)
    }
}

impl Default for EmailInput<NoopReporter> {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

impl<R: InviteReporter> EmailInput<R> {
    pub fn with_reporter(config: InputConfig, reporter: R) -> Self {
        Self {
            config,
            collection: EmailCollection::new(),
            input_value: String::new(),
            selection: ChipSelection::Idle,
            visible_limit: VisibleLimit::Unbounded,
            popover_open: false,
            pulse_until: None,
            coordinator: SubmissionCoordinator::new(),
            reporter,
        }
    }

    /// Seed the collection at mount
    #[must_use]
    pub fn with_initial_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.collection = EmailCollection::with_initial(emails);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &InputConfig {
        &self.config
    }

    #[must_use]
    pub const fn collection(&self) -> &EmailCollection {
        &self.collection
    }

    #[must_use]
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    pub const fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Replace the pending text. Any edit drops the selection.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
        self.selection.clear();
    }

    /// Focus left the input
    pub fn blur(&mut self) {
        self.selection.clear();
    }

    /// Add one email typed by the user.
    ///
    /// Rejections are reported through the reporter and start the pulse; the
    /// pending text is kept so the user can fix it.
    pub fn add_email(&mut self, raw: &str, invited: &InvitedSet) -> Result<Option<String>> {
        self.selection.clear();
        match self.collection.add_one(raw, invited) {
            Ok(Some(email)) => {
                self.input_value.clear();
                Ok(Some(email))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.report_rejection(&e);
                Err(e)
            }
        }
    }

    /// Commit the pending text as a chip
    pub fn add_pending(&mut self, invited: &InvitedSet) -> Result<Option<String>> {
        let raw = std::mem::take(&mut self.input_value);
        let result = self.add_email(&raw, invited);
        if !matches!(result, Ok(Some(_))) {
            self.input_value = raw;
        }
        result
    }

    pub fn handle_key(&mut self, key: Key, invited: &InvitedSet) -> KeyOutcome {
        match key {
            k if k.is_delimiter() && !self.input_value.is_empty() => {
                match self.add_pending(invited) {
                    Ok(Some(email)) => KeyOutcome::Added(email),
                    Ok(None) => KeyOutcome::Ignored,
                    Err(e) => KeyOutcome::Rejected(e),
                }
            }
            Key::Backspace if self.input_value.is_empty() => self.handle_backspace(),
            Key::Escape => {
                self.selection.clear();
                self.close_popover();
                KeyOutcome::Ignored
            }
            _ => {
                self.selection.clear();
                KeyOutcome::Ignored
            }
        }
    }

    fn handle_backspace(&mut self) -> KeyOutcome {
        let len = self.collection.len();
        let visible = self.visible_limit.visible_count(len);
        let last = self.collection.last().map(|chip| LastChip {
            email: &chip.email,
            visible: len <= visible,
        });

        match self.selection.on_backspace(last) {
            BackspaceAction::None => KeyOutcome::Ignored,
            BackspaceAction::Arm(email) => {
                debug!("Selected email chip: {email}");
                KeyOutcome::Armed(email)
            }
            BackspaceAction::Remove(email) => {
                self.collection.remove(&email);
                self.after_change();
                KeyOutcome::Removed(email)
            }
        }
    }

    /// Remove a chip, e.g. from its close button or the popover
    pub fn remove_email(&mut self, email: &str) -> bool {
        let removed = self.collection.remove(email);
        if let Some(email) = normalize(email) {
            self.selection.forget(&email);
        }
        self.after_change();
        removed
    }

    pub fn remove_last(&mut self) -> Option<EmailChip> {
        let chip = self.collection.remove_last();
        self.selection.clear();
        self.after_change();
        chip
    }

    /// Drop every chip and the pending text
    pub fn clear_all(&mut self) {
        self.collection.clear();
        self.input_value.clear();
        self.selection.clear();
        self.after_change();
    }

    /// Reconcile many raw tokens at once
    pub fn add_emails_bulk<S: AsRef<str>>(
        &mut self,
        raw_tokens: &[S],
        invited: &InvitedSet,
    ) -> ReconciliationResult {
        self.selection.clear();
        let result = reconcile(raw_tokens, &mut self.collection, invited);
        self.after_change();
        result
    }

    /// Handle clipboard text pasted into the input
    pub fn handle_paste(&mut self, text: &str, invited: &InvitedSet) -> PasteOutcome {
        let tokens = tokenize(text);
        if tokens.len() <= 1 {
            return PasteOutcome::Inline;
        }

        let result = self.add_emails_bulk(&tokens, invited);
        self.input_value.clear();
        PasteOutcome::Bulk(result)
    }

    /// Recompute the visible split from fresh measurements.
    ///
    /// `measured_widths` holds each chip's rendered width in collection order;
    /// the configured gap is added here. Without any widths only the first
    /// chip is shown. Widths that do not match the chip count are stale, so
    /// the current limit is kept until the caller measures again.
    pub fn recompute_overflow(
        &mut self,
        container_width: f64,
        measured_widths: &[f64],
    ) -> VisibleLimit {
        let count = self.collection.len();
        let limit = if count == 0 {
            VisibleLimit::Unbounded
        } else if measured_widths.is_empty() {
            VisibleLimit::AtMost(1)
        } else if measured_widths.len() != count {
            warn!(
                "Ignoring {} chip widths for {count} chips, keeping {:?}",
                measured_widths.len(),
                self.visible_limit
            );
            return self.visible_limit;
        } else {
            let overflow = &self.config.overflow;
            let available = overflow.available_width(container_width, count);
            let slots: Vec<f64> = measured_widths
                .iter()
                .map(|w| overflow.slot_width(*w))
                .collect();
            max_visible(available, &slots)
        };
        self.set_visible_limit(limit);
        limit
    }

    pub fn set_visible_limit(&mut self, limit: VisibleLimit) {
        if self.visible_limit != limit {
            debug!("Visible chip limit changed to {limit:?}");
            self.visible_limit = limit;
        }
        self.after_change();
    }

    #[must_use]
    pub const fn visible_limit(&self) -> VisibleLimit {
        self.visible_limit
    }

    #[must_use]
    pub fn visible_chips(&self) -> &[EmailChip] {
        self.visible_limit.split(self.collection.as_slice()).0
    }

    #[must_use]
    pub fn hidden_chips(&self) -> &[EmailChip] {
        self.visible_limit.split(self.collection.as_slice()).1
    }

    #[must_use]
    pub fn has_hidden_chips(&self) -> bool {
        !self.hidden_chips().is_empty()
    }

    /// The chip armed for deletion, while it is still the last visible chip
    #[must_use]
    pub fn selected_chip(&self) -> Option<&str> {
        let email = self.selection.selected()?;
        let last = self.collection.last()?;
        let len = self.collection.len();
        (last.email == email && len <= self.visible_limit.visible_count(len)).then_some(email)
    }

    pub fn toggle_popover(&mut self) {
        self.popover_open = !self.popover_open && self.has_hidden_chips();
    }

    pub const fn close_popover(&mut self) {
        self.popover_open = false;
    }

    #[must_use]
    pub fn is_popover_open(&self) -> bool {
        self.popover_open && self.has_hidden_chips()
    }

    /// Whether the rejected-entry pulse is on right now
    #[must_use]
    pub fn is_duplicate_pulse_active(&self) -> bool {
        self.is_duplicate_pulse_active_at(Instant::now())
    }

    #[must_use]
    pub fn is_duplicate_pulse_active_at(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }

    #[must_use]
    pub fn valid_email_count(&self) -> usize {
        self.collection.valid_count()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.coordinator.is_submitting()
    }

    /// Whether the submit action should be enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.valid_email_count() > 0 && !self.is_submitting()
    }

    /// Validate pending text and hand out the list to submit.
    ///
    /// Returns `Ok(None)` when there is nothing to send. Until the ticket is
    /// passed to [`finish_submit`](Self::finish_submit), further attempts
    /// fail with [`SubmitError::InProgress`].
    pub fn begin_submit(
        &mut self,
        invited: &InvitedSet,
    ) -> std::result::Result<Option<SubmissionTicket>, SubmitError> {
        match self
            .coordinator
            .prepare(&self.collection, &self.input_value, invited)
        {
            Err(SubmitError::Rejected(e)) => {
                warn!("Submission aborted, pending email rejected: {e}");
                self.report_rejection(&e);
                Err(SubmitError::Rejected(e))
            }
            other => other,
        }
    }

    /// Apply the sink outcome. On success everything is cleared; on failure
    /// the collection and pending text stay as they were.
    pub fn finish_submit<E: fmt::Display>(
        &mut self,
        ticket: SubmissionTicket,
        outcome: std::result::Result<(), E>,
    ) -> std::result::Result<usize, SubmitError> {
        match self.coordinator.settle(ticket, outcome) {
            Ok(count) => {
                self.clear_all();
                self.popover_open = false;
                self.reporter.on_success(count);
                Ok(count)
            }
            Err(SubmitError::StaleTicket) => Err(SubmitError::StaleTicket),
            Err(e) => {
                self.reporter.on_submit_failed(&e.to_string());
                Err(e)
            }
        }
    }

    /// Validate, send through `sink` and settle in one call
    pub async fn submit<S: SubmitSink>(
        &mut self,
        sink: &mut S,
        invited: &InvitedSet,
    ) -> std::result::Result<usize, SubmitError> {
        let Some(ticket) = self.begin_submit(invited)? else {
            return Ok(0);
        };
        let emails = ticket.emails().to_vec();
        let pending = PendingSubmission {
            input: self,
            ticket: Some(ticket),
        };
        let outcome = sink.submit(emails).await;
        pending.finish(outcome)
    }

    fn report_rejection(&mut self, error: &AddError) {
        debug!("Rejected email {}: {error}", error.email());
        match error {
            AddError::DuplicateInList { .. } => self.reporter.on_duplicate_in_list(),
            AddError::AlreadyInvited { .. } => self.reporter.on_already_invited(),
            AddError::InvalidSyntax { .. } => self.reporter.on_invalid_email(),
        }
        self.pulse_until = Some(Instant::now() + self.config.duplicate_pulse());
    }

    fn after_change(&mut self) {
        if self.collection.is_empty() {
            self.visible_limit = VisibleLimit::Unbounded;
        }
        if !self.has_hidden_chips() {
            self.popover_open = false;
        }
    }
}

/// A submission waiting on its sink. Dropping it before the sink settles
/// releases the in-flight guard and leaves the chips untouched.
struct PendingSubmission<'a, R: InviteReporter> {
    input: &'a mut EmailInput<R>,
    ticket: Option<SubmissionTicket>,
}

impl<R: InviteReporter> PendingSubmission<'_, R> {
    fn finish<E: fmt::Display>(
        mut self,
        outcome: std::result::Result<(), E>,
    ) -> std::result::Result<usize, SubmitError> {
        match self.ticket.take() {
            Some(ticket) => self.input.finish_submit(ticket, outcome),
            None => Err(SubmitError::StaleTicket),
        }
    }
}

impl<R: InviteReporter> Drop for PendingSubmission<'_, R> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.input.coordinator.abandon(ticket);
        }
    }
}
