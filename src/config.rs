//! Tunables for the chip input

use crate::overflow::OverflowConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an [`EmailInput`](crate::EmailInput)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Reserved widths used when computing overflow
    pub overflow: OverflowConfig,

    /// How long the rejected-entry pulse stays on, in milliseconds
    pub duplicate_pulse_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowConfig::default(),
            duplicate_pulse_ms: 500,
        }
    }
}

impl InputConfig {
    #[must_use]
    pub const fn duplicate_pulse(&self) -> Duration {
        Duration::from_millis(self.duplicate_pulse_ms)
    }
}
