// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Invite Input
//!
//! The engine behind a multi-email invite field: typed and pasted text is
//! turned into validated, de-duplicated email chips, split into visible and
//! overflowed chips by available width, and finally submitted as one list.
//!
//! # Features
//!
//! - Normalization and syntax validation of email tokens
//! - Paste tokenizing on commas, semicolons and whitespace
//! - Bulk reconciliation against the current chips and already invited users
//! - Width-based overflow into a "+N" popover
//! - Backspace arm-then-delete of the last chip
//! - Guarded, retryable submission through an async sink
//!
//! # Example
//!
//! ```rust
//! use email_invite::{EmailInput, InputConfig, InvitedSet, PasteOutcome};
//!
//! let invited = InvitedSet::new(["taken@example.com"]);
//! let mut input = EmailInput::new(InputConfig::default());
//!
//! input.add_email("Alice@Example.com", &invited).unwrap();
//! let outcome = input.handle_paste("bob@example.com, taken@example.com; nope", &invited);
//!
//! if let PasteOutcome::Bulk(result) = outcome {
//!     println!("{}", result.summary().message);
//! }
//! assert_eq!(input.collection().emails(), ["alice@example.com", "bob@example.com"]);
//! ```

mod collection;
mod config;
mod error;
mod input;
mod normalize;
mod overflow;
mod reconcile;
mod report;
mod selection;
mod submit;
mod tokenize;
mod types;
mod users;

pub use collection::EmailCollection;
pub use config::InputConfig;
pub use error::{AddError, Result, SubmitError};
pub use input::{EmailInput, KeyOutcome, PasteOutcome};
pub use normalize::{is_valid_syntax, normalize};
pub use overflow::{OverflowConfig, VisibleLimit, max_visible};
pub use reconcile::reconcile;
pub use report::{BulkSummary, InviteReporter, NoopReporter, SummaryVariant, success_message};
pub use selection::{BackspaceAction, ChipSelection, Key, LastChip};
pub use submit::{SubmissionCoordinator, SubmissionTicket, SubmitSink};
pub use tokenize::tokenize;
pub use types::*;
pub use users::*;
