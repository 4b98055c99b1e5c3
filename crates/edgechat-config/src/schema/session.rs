//! Conversation session settings.

use serde::{Deserialize, Serialize};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Turns retained as prompt context (valid range: 1-100).
    pub max_turns: u32,
    /// Drop the pending user turn when a generation is cancelled.
    pub rollback_on_cancel: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: 10,
            rollback_on_cancel: false,
        }
    }
}
