//! Turning submitted emails into user rows

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

const DEFAULT_PALETTE: [&str; 5] = [
    "from-pink-500 to-rose-500",
    "from-purple-500 to-indigo-500",
    "from-blue-500 to-cyan-500",
    "from-emerald-500 to-teal-500",
    "from-orange-500 to-amber-500",
];

/// A user created from an accepted invite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,

    /// Display date, e.g. "March 5, 2024"
    pub added_on: String,

    pub initials: String,

    /// Avatar gradient class
    pub gradient: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    #[default]
    Guest,
    Editor,
    Viewer,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Admin => "Admin",
            Self::Guest => "Guest",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// Derive a display name from the local part of an email.
///
/// `john.doe-smith@example.com` becomes `John Doe Smith`.
#[must_use]
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    local
        .split(['.', '_', '-'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// First letter of up to the first two words, uppercased
#[must_use]
pub fn initials_from_name(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Format an ISO `YYYY-MM-DD` date as "Month D, YYYY".
///
/// Anything else is assumed to be formatted already and passes through.
#[must_use]
pub fn format_added_on(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), format_date)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Builds user rows for a batch of submitted emails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFactory {
    /// Avatar gradients, assigned round-robin
    pub palette: Vec<String>,

    /// Role given to every new user
    pub default_role: UserRole,
}

impl Default for UserFactory {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            default_role: UserRole::Guest,
        }
    }
}

impl UserFactory {
    /// Gradient for the row at `index`
    #[must_use]
    pub fn gradient_for(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return String::new();
        }
        self.palette[index % self.palette.len()].clone()
    }

    /// Create one active user per email, all stamped with `now`
    #[must_use]
    pub fn create_users<S: AsRef<str>>(
        &self,
        emails: &[S],
        now: DateTime<Utc>,
    ) -> Vec<SubmittedUser> {
        let batch = now.timestamp_millis();
        let added_on = format_date(now.date_naive());

        emails
            .iter()
            .enumerate()
            .map(|(idx, email)| {
                let email = email.as_ref();
                let name = name_from_email(email);
                SubmittedUser {
                    id: format!("user-{batch}-{idx}"),
                    email: email.to_string(),
                    initials: initials_from_name(&name),
                    name,
                    role: self.default_role,
                    status: UserStatus::Active,
                    added_on: added_on.clone(),
                    gradient: self.gradient_for(idx),
                }
            })
            .collect()
    }
}

/// Read a stored user list.
///
/// Returns `None` for malformed or empty snapshots so the caller can fall
/// back to its defaults.
#[must_use]
pub fn restore_users(json: &str) -> Option<Vec<SubmittedUser>> {
    match serde_json::from_str::<Vec<SubmittedUser>>(json) {
        Ok(users) if users.is_empty() => None,
        Ok(users) => Some(users),
        Err(e) => {
            warn!("Failed to parse stored users: {e}");
            None
        }
    }
}
