//! Splitting chips into visible and overflowed sets by available width

use crate::types::EmailChip;
use serde::{Deserialize, Serialize};

/// Reserved widths around the chip row, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverflowConfig {
    /// Minimum width kept free for the text input
    pub input_min_width: f64,

    /// Width of the "+N" button
    pub more_button_width: f64,

    /// Gap between adjacent items
    pub gap: f64,

    /// Horizontal padding on each side of the container
    pub padding_x: f64,
}

impl Default for OverflowConfig {
    fn default() -> Self {
        Self {
            input_min_width: 100.0,
            more_button_width: 48.0,
            gap: 8.0,
            padding_x: 16.0,
        }
    }
}

impl OverflowConfig {
    /// Width left for chips once the input, padding and (for more than one
    /// chip) the "+N" button are reserved. Never negative.
    #[must_use]
    pub fn available_width(&self, container_width: f64, chip_count: usize) -> f64 {
        let more_button = if chip_count > 1 {
            self.more_button_width + self.gap
        } else {
            0.0
        };
        let reserved = self.padding_x * 2.0 + self.input_min_width + self.gap + more_button;
        (container_width - reserved).max(0.0)
    }

    /// Width one chip occupies in the row, including its trailing gap
    #[must_use]
    pub fn slot_width(&self, measured: f64) -> f64 {
        measured + self.gap
    }
}

/// How many chips may be shown inline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibleLimit {
    /// Everything fits, no "+N" affordance needed
    #[default]
    Unbounded,

    /// Only the first `n` chips are shown
    AtMost(usize),
}

impl VisibleLimit {
    /// Number of chips shown out of `total`
    #[must_use]
    pub fn visible_count(self, total: usize) -> usize {
        match self {
            Self::Unbounded => total,
            Self::AtMost(n) => n.min(total),
        }
    }

    /// Split chips into `(visible, hidden)`
    #[must_use]
    pub fn split(self, chips: &[EmailChip]) -> (&[EmailChip], &[EmailChip]) {
        chips.split_at(self.visible_count(chips.len()))
    }
}

/// Greedily fit chip slot widths into `available_width`.
///
/// An empty row is unbounded. A non-empty row always shows at least one chip,
/// even when none fit.
#[must_use]
pub fn max_visible(available_width: f64, slot_widths: &[f64]) -> VisibleLimit {
    if slot_widths.is_empty() {
        return VisibleLimit::Unbounded;
    }

    let mut used = 0.0;
    let mut count = 0;
    for width in slot_widths {
        if used + width > available_width {
            break;
        }
        used += width;
        count += 1;
    }

    VisibleLimit::AtMost(count.max(1))
}
