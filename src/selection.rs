//! Backspace-driven chip selection

/// Keys the chip input reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Comma,
    Space,
    Backspace,
    Escape,
    /// Any other key
    Other,
}

impl Key {
    /// Keys that commit the pending text as a chip
    #[must_use]
    pub const fn is_delimiter(self) -> bool {
        matches!(self, Self::Enter | Self::Comma | Self::Space)
    }
}

/// The last chip as seen by the selection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastChip<'a> {
    pub email: &'a str,
    /// Whether the chip is rendered inline rather than in the overflow popover
    pub visible: bool,
}

/// What a Backspace on empty input should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackspaceAction {
    /// Nothing to select or delete
    None,
    /// Highlight the chip, deletion waits for a second Backspace
    Arm(String),
    /// Delete the chip now
    Remove(String),
}

/// Selection state for keyboard deletion.
///
/// Only the last chip can ever be armed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChipSelection {
    #[default]
    Idle,
    Selected(String),
}

impl ChipSelection {
    /// Advance on Backspace pressed while the text input is empty.
    ///
    /// A selection that no longer points at the last visible chip is treated
    /// as idle.
    pub fn on_backspace(&mut self, last: Option<LastChip<'_>>) -> BackspaceAction {
        let Some(last) = last else {
            *self = Self::Idle;
            return BackspaceAction::None;
        };

        if last.visible && self.selected() == Some(last.email) {
            *self = Self::Idle;
            return BackspaceAction::Remove(last.email.to_string());
        }

        if last.visible {
            *self = Self::Selected(last.email.to_string());
            BackspaceAction::Arm(last.email.to_string())
        } else {
            *self = Self::Idle;
            BackspaceAction::Remove(last.email.to_string())
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Drop the selection if it points at `email`
    pub fn forget(&mut self, email: &str) {
        if self.selected() == Some(email) {
            self.clear();
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Selected(email) => Some(email),
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
