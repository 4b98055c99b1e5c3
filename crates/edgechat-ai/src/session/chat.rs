//! Async submission methods for ConversationSession.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::turn::Turn;
use crate::{AiError, Generation, GenerationError};

use super::manager::ConversationSession;
use super::types::{CancelPolicy, SubmitOutcome};

impl ConversationSession {
    /// Record `user_text`, ask the generator for a reply, and record that too.
    ///
    /// The caller is expected to reject blank input. On failure the user
    /// turn stays in history and no assistant turn is added.
    pub async fn submit(
        &mut self,
        user_text: impl Into<String>,
    ) -> Result<String, GenerationError> {
        self.begin_turn(user_text.into());
        let prompt = self.prompt();
        let generator = Arc::clone(&self.generator);
        let result = generator.generate(&prompt).await;
        self.finish_turn(result)
    }

    /// Like [`submit`](Self::submit), but abandons the generator call as soon
    /// as `cancel` fires. No assistant turn is recorded on cancellation; the
    /// user turn is handled per the session's [`CancelPolicy`].
    pub async fn submit_cancellable(
        &mut self,
        user_text: impl Into<String>,
        cancel: &CancellationToken,
    ) -> SubmitOutcome {
        if cancel.is_cancelled() {
            return SubmitOutcome::Cancelled;
        }

        let evicted = self.begin_turn(user_text.into());
        let prompt = self.prompt();
        let generator = Arc::clone(&self.generator);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.abandon_turn(evicted);
                SubmitOutcome::Cancelled
            }
            result = generator.generate(&prompt) => self.finish_turn(result).into(),
        }
    }

    fn begin_turn(&mut self, user_text: String) -> Option<Turn> {
        let evicted = self.history.push(Turn::user(user_text));
        if evicted.is_some() {
            debug!(session = %self.id.short(), "History full, evicted oldest turn");
        }
        evicted
    }

    fn finish_turn(
        &mut self,
        result: Result<Generation, AiError>,
    ) -> Result<String, GenerationError> {
        match result {
            Ok(generation) => {
                self.tracker.record(self.generator.name(), &generation.usage);
                let text = generation.text.unwrap_or_default();
                debug!(
                    session = %self.id.short(),
                    response_len = text.len(),
                    "Generation completed"
                );
                self.history.push(Turn::assistant(text.clone()));
                Ok(text)
            }
            Err(e) => {
                warn!(
                    session = %self.id.short(),
                    generator = self.generator.name(),
                    "Generation failed: {e}"
                );
                Err(GenerationError::from(e))
            }
        }
    }

    fn abandon_turn(&mut self, evicted: Option<Turn>) {
        match self.cancel_policy {
            CancelPolicy::KeepUserTurn => {
                info!(session = %self.id.short(), "Generation cancelled, user turn kept");
            }
            CancelPolicy::RollbackUserTurn => {
                self.history.retract(evicted);
                info!(session = %self.id.short(), "Generation cancelled, user turn rolled back");
            }
        }
    }
}
