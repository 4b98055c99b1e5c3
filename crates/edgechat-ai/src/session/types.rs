//! Session submission outcomes and cancellation policy.

use crate::GenerationError;

/// What happens to the pending user turn when a generation is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelPolicy {
    /// Leave the user turn in history without a reply.
    #[default]
    KeepUserTurn,
    /// Remove the user turn and restore any turn it evicted.
    RollbackUserTurn,
}

impl CancelPolicy {
    pub fn from_rollback_flag(rollback: bool) -> Self {
        if rollback {
            Self::RollbackUserTurn
        } else {
            Self::KeepUserTurn
        }
    }
}

/// Result of a cancellable submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed(String),
    Failed(GenerationError),
    Cancelled,
}

impl From<Result<String, GenerationError>> for SubmitOutcome {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => Self::Completed(text),
            Err(e) => Self::Failed(e),
        }
    }
}
