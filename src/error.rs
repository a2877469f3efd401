//! Error types for chip entry and submission

use thiserror::Error;

/// Reasons a single email could not be added as a chip
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddError {
    /// The email is already a chip in the collection
    #[error("Email already added to list")]
    DuplicateInList { email: String },

    /// The email belongs to a user who was invited earlier
    #[error("User already invited")]
    AlreadyInvited { email: String },

    /// The email does not match the accepted address syntax
    #[error("Please enter a valid email address")]
    InvalidSyntax { email: String },
}

impl AddError {
    /// The normalized email that was rejected
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::DuplicateInList { email }
            | Self::AlreadyInvited { email }
            | Self::InvalidSyntax { email } => email,
        }
    }
}

/// Errors that can occur while submitting the collected emails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Pending text failed validation, nothing was sent
    #[error(transparent)]
    Rejected(#[from] AddError),

    /// Another submission has not settled yet
    #[error("A submission is already in progress")]
    InProgress,

    /// The ticket does not belong to the submission in flight
    #[error("No submission is in progress for this ticket")]
    StaleTicket,

    /// The submit sink reported a failure
    #[error("Failed to send invites: {0}")]
    Failed(String),
}

/// Result type for chip operations
pub type Result<T> = std::result::Result<T, AddError>;
