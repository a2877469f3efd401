use email_invite::*;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<String>,
}

impl InviteReporter for Recorder {
    fn on_success(&mut self, count: usize) {
        self.events.push(format!("success:{count}"));
    }

    fn on_duplicate_in_list(&mut self) {
        self.events.push("duplicate".into());
    }

    fn on_already_invited(&mut self) {
        self.events.push("invited".into());
    }

    fn on_invalid_email(&mut self) {
        self.events.push("invalid".into());
    }
}

fn input_with(emails: &[&str]) -> EmailInput<Recorder> {
    EmailInput::with_reporter(InputConfig::default(), Recorder::default())
        .with_initial_emails(emails.iter().copied())
}

// --- single add ---

#[test]
fn test_enter_commits_pending_text() {
    let mut input = input_with(&[]);
    input.set_input_value("Foo@Bar.com");

    let outcome = input.handle_key(Key::Enter, &InvitedSet::empty());

    assert_eq!(outcome, KeyOutcome::Added("foo@bar.com".into()));
    assert!(outcome.prevents_default());
    assert_eq!(input.input_value(), "");
    assert_eq!(input.collection().emails(), ["foo@bar.com"]);
}

#[test]
fn test_comma_and_space_commit() {
    let mut input = input_with(&[]);
    let invited = InvitedSet::empty();

    input.set_input_value("a@x.com");
    assert!(matches!(input.handle_key(Key::Comma, &invited), KeyOutcome::Added(_)));
    input.set_input_value("b@x.com");
    assert!(matches!(input.handle_key(Key::Space, &invited), KeyOutcome::Added(_)));

    assert_eq!(input.collection().emails(), ["a@x.com", "b@x.com"]);
}

#[test]
fn test_delimiter_on_empty_input_is_ignored() {
    let mut input = input_with(&["a@x.com"]);
    let outcome = input.handle_key(Key::Enter, &InvitedSet::empty());
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert!(!outcome.prevents_default());
    assert_eq!(input.collection().len(), 1);
}

#[test]
fn test_rejection_keeps_text_and_reports_once() {
    let mut input = input_with(&["a@x.com"]);
    input.set_input_value("A@x.com");

    let outcome = input.handle_key(Key::Enter, &InvitedSet::empty());

    assert!(matches!(
        outcome,
        KeyOutcome::Rejected(AddError::DuplicateInList { .. })
    ));
    assert_eq!(input.input_value(), "A@x.com");
    assert_eq!(input.reporter().events, ["duplicate"]);
}

#[test]
fn test_each_rejection_kind_hits_its_reporter() {
    let mut input = input_with(&["a@x.com"]);
    let invited = InvitedSet::new(["b@x.com"]);

    let _ = input.add_email("a@x.com", &invited);
    let _ = input.add_email("b@x.com", &invited);
    let _ = input.add_email("nope", &invited);

    assert_eq!(input.reporter().events, ["duplicate", "invited", "invalid"]);
    assert_eq!(input.collection().len(), 1);
}

#[test]
fn test_blank_add_reports_nothing() {
    let mut input = input_with(&[]);
    assert_eq!(input.add_email("   ", &InvitedSet::empty()), Ok(None));
    assert!(input.reporter().events.is_empty());
    assert!(!input.is_duplicate_pulse_active());
}

#[test]
fn test_pulse_turns_off_after_delay() {
    let mut input = input_with(&["a@x.com"]);
    assert!(!input.is_duplicate_pulse_active());

    let _ = input.add_email("a@x.com", &InvitedSet::empty());

    assert!(input.is_duplicate_pulse_active());
    let later = Instant::now() + Duration::from_millis(600);
    assert!(!input.is_duplicate_pulse_active_at(later));
}

// --- keyboard selection ---

#[test]
fn test_backspace_arms_then_removes() {
    let mut input = input_with(&["a@x.com", "z@x.com"]);
    let invited = InvitedSet::empty();

    assert_eq!(
        input.handle_key(Key::Backspace, &invited),
        KeyOutcome::Armed("z@x.com".into())
    );
    assert_eq!(input.selected_chip(), Some("z@x.com"));
    assert_eq!(input.collection().len(), 2);

    assert_eq!(
        input.handle_key(Key::Backspace, &invited),
        KeyOutcome::Removed("z@x.com".into())
    );
    assert_eq!(input.selected_chip(), None);
    assert_eq!(input.collection().emails(), ["a@x.com"]);
}

#[test]
fn test_typing_resets_selection() {
    let mut input = input_with(&["z@x.com"]);
    let invited = InvitedSet::empty();

    input.handle_key(Key::Backspace, &invited);
    input.set_input_value("q");
    assert_eq!(input.selected_chip(), None);
    input.set_input_value("");

    assert_eq!(
        input.handle_key(Key::Backspace, &invited),
        KeyOutcome::Armed("z@x.com".into())
    );
    assert_eq!(input.collection().len(), 1);
}

#[test]
fn test_other_key_and_blur_reset_selection() {
    let mut input = input_with(&["z@x.com"]);
    let invited = InvitedSet::empty();

    input.handle_key(Key::Backspace, &invited);
    input.handle_key(Key::Other, &invited);
    assert_eq!(input.selected_chip(), None);

    input.handle_key(Key::Backspace, &invited);
    input.blur();
    assert_eq!(input.selected_chip(), None);
    assert_eq!(input.collection().len(), 1);
}

#[test]
fn test_backspace_with_text_edits_text() {
    let mut input = input_with(&["z@x.com"]);
    input.set_input_value("abc");
    assert_eq!(
        input.handle_key(Key::Backspace, &InvitedSet::empty()),
        KeyOutcome::Ignored
    );
    assert_eq!(input.collection().len(), 1);
}

#[test]
fn test_backspace_removes_hidden_last_chip_immediately() {
    let mut input = input_with(&["a@x.com", "b@x.com", "c@x.com"]);
    input.set_visible_limit(VisibleLimit::AtMost(1));

    assert_eq!(
        input.handle_key(Key::Backspace, &InvitedSet::empty()),
        KeyOutcome::Removed("c@x.com".into())
    );
    assert_eq!(input.collection().emails(), ["a@x.com", "b@x.com"]);
}

#[test]
fn test_selection_dropped_when_chip_becomes_hidden() {
    let mut input = input_with(&["a@x.com", "z@x.com"]);
    input.handle_key(Key::Backspace, &InvitedSet::empty());
    input.set_visible_limit(VisibleLimit::AtMost(1));
    assert_eq!(input.selected_chip(), None);
}

#[test]
fn test_removing_selected_chip_clears_selection() {
    let mut input = input_with(&["a@x.com", "z@x.com"]);
    let invited = InvitedSet::empty();
    input.handle_key(Key::Backspace, &invited);

    assert!(input.remove_email("Z@x.com"));
    input.add_email("z@x.com", &invited).unwrap();
    assert_eq!(input.selected_chip(), None);
}

#[test]
fn test_remove_last_and_clear_all() {
    let mut input = input_with(&["a@x.com", "b@x.com"]);
    input.set_input_value("draft");

    assert_eq!(input.remove_last().map(|c| c.email), Some("b@x.com".to_string()));
    input.clear_all();

    assert!(input.collection().is_empty());
    assert_eq!(input.input_value(), "");
}

// --- paste ---

#[test]
fn test_single_token_paste_is_inline() {
    let mut input = input_with(&[]);
    input.set_input_value("x");
    let outcome = input.handle_paste("a@x.com", &InvitedSet::empty());

    assert_eq!(outcome, PasteOutcome::Inline);
    assert!(input.collection().is_empty());
    assert_eq!(input.input_value(), "x");
}

#[test]
fn test_bulk_paste_reconciles() {
    let mut input = input_with(&["a@x.com"]);
    input.set_input_value("partial");
    let invited = InvitedSet::new(["b@x.com"]);

    let outcome = input.handle_paste("a@x.com, b@x.com\nc@x.com; junk", &invited);

    let PasteOutcome::Bulk(result) = outcome else {
        panic!("expected bulk outcome");
    };
    assert_eq!(result.added, 1);
    assert_eq!(result.invalid, 1);
    assert_eq!(result.skipped_in_input, 1);
    assert_eq!(result.skipped_invited, 1);
    assert_eq!(input.input_value(), "");
    assert_eq!(input.collection().emails(), ["a@x.com", "c@x.com"]);
    assert!(input.reporter().events.is_empty());
}

// --- overflow ---

#[test]
fn test_recompute_overflow_splits_chips() {
    let mut input = input_with(&["a@x.com", "b@x.com", "c@x.com"]);

    // 400 - 196 reserved leaves 204, each chip takes 92 + 8
    let limit = input.recompute_overflow(400.0, &[92.0, 92.0, 92.0]);

    assert_eq!(limit, VisibleLimit::AtMost(2));
    assert_eq!(input.visible_chips().len(), 2);
    assert_eq!(input.hidden_chips()[0].email, "c@x.com");
    assert!(input.has_hidden_chips());
}

#[test]
fn test_recompute_overflow_narrow_container_keeps_one() {
    let mut input = input_with(&["a@x.com"]);
    assert_eq!(
        input.recompute_overflow(0.0, &[150.0]),
        VisibleLimit::AtMost(1)
    );
    assert_eq!(input.visible_chips().len(), 1);
}

#[test]
fn test_recompute_overflow_empty_is_unbounded() {
    let mut input = input_with(&[]);
    assert_eq!(input.recompute_overflow(10.0, &[]), VisibleLimit::Unbounded);
    assert!(input.hidden_chips().is_empty());
}

#[test]
fn test_popover_closes_when_hidden_list_empties() {
    let mut input = input_with(&["a@x.com", "b@x.com"]);
    input.set_visible_limit(VisibleLimit::AtMost(1));

    input.toggle_popover();
    assert!(input.is_popover_open());

    input.remove_email("b@x.com");
    assert!(!input.is_popover_open());
}

#[test]
fn test_popover_needs_hidden_chips() {
    let mut input = input_with(&["a@x.com"]);
    input.toggle_popover();
    assert!(!input.is_popover_open());
}

#[test]
fn test_escape_closes_popover() {
    let mut input = input_with(&["a@x.com", "b@x.com"]);
    input.set_visible_limit(VisibleLimit::AtMost(1));
    input.toggle_popover();

    input.handle_key(Key::Escape, &InvitedSet::empty());
    assert!(!input.is_popover_open());
}

#[test]
fn test_can_submit_needs_valid_chip() {
    let mut input = input_with(&["oops"]);
    assert_eq!(input.valid_email_count(), 0);
    assert!(!input.can_submit());

    input.add_email("a@x.com", &InvitedSet::empty()).unwrap();
    assert!(input.can_submit());
}

#[test]
fn test_default_input_is_empty() {
    let input: EmailInput = EmailInput::default();
    assert!(input.collection().is_empty());
    assert_eq!(input.visible_limit(), VisibleLimit::Unbounded);
    assert_eq!(input.config().duplicate_pulse(), Duration::from_millis(500));
}

#[test]
fn test_recompute_overflow_without_widths_shows_one() {
    let mut input = input_with(&["a@x.com", "b@x.com", "c@x.com"]);

    assert_eq!(input.recompute_overflow(0.0, &[]), VisibleLimit::AtMost(1));
    assert_eq!(input.visible_chips().len(), 1);
    assert_eq!(input.hidden_chips().len(), 2);
}

#[test]
fn test_recompute_overflow_keeps_limit_on_stale_widths() {
    let mut input = input_with(&["a@x.com", "b@x.com", "c@x.com"]);
    input.recompute_overflow(10_000.0, &[10.0, 10.0, 10.0]);
    assert_eq!(input.visible_limit(), VisibleLimit::AtMost(3));

    assert_eq!(
        input.recompute_overflow(10_000.0, &[10.0]),
        VisibleLimit::AtMost(3)
    );
    assert!(input.hidden_chips().is_empty());

    input.add_email("d@x.com", &InvitedSet::empty()).unwrap();
    assert_eq!(
        input.recompute_overflow(10_000.0, &[10.0, 10.0, 10.0, 10.0, 10.0]),
        VisibleLimit::AtMost(3)
    );
}

#[test]
fn test_input_debug_output() {
    let input = input_with(&["a@x.com"]);
    let debug = format!("{input:?}");
    assert!(debug.contains("EmailInput"));
    assert!(debug.contains("a@x.com"));
}
