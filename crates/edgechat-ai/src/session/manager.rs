//! ConversationSession struct and history management.

use std::sync::Arc;

use edgechat_common::SessionId;
use tracing::info;

use crate::history::{History, DEFAULT_HISTORY_CAPACITY};
use crate::prompt::flatten_prompt;
use crate::token_tracker::TokenTracker;
use crate::turn::Turn;
use crate::TextGenerator;

use super::types::CancelPolicy;

/// A conversation with one persona instruction and a bounded history.
pub struct ConversationSession {
    /// Fresh on every (re)initialization.
    pub(super) id: SessionId,
    /// Persona instruction; never stored in `history`.
    pub(super) system_instruction: Option<String>,
    pub(super) history: History,
    /// Swapped wholesale on configuration change, never mutated.
    pub(super) generator: Arc<dyn TextGenerator>,
    pub(super) cancel_policy: CancelPolicy,
    pub(super) tracker: TokenTracker,
}

impl ConversationSession {
    pub fn new(generator: Arc<dyn TextGenerator>, system_instruction: Option<String>) -> Self {
        Self {
            id: SessionId::new(),
            system_instruction,
            history: History::new(DEFAULT_HISTORY_CAPACITY),
            generator,
            cancel_policy: CancelPolicy::default(),
            tracker: TokenTracker::new(),
        }
    }

    /// Bound the history to `max_turns` (user and assistant turns combined).
    /// Clears the history.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.history = History::new(max_turns);
        self
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// Change the history bound and cancel policy in place. Clears the
    /// history; token usage is kept.
    pub fn reconfigure(&mut self, max_turns: usize, policy: CancelPolicy) {
        self.history = History::new(max_turns);
        self.cancel_policy = policy;
    }

    /// Start over with a new instruction: history is emptied and a new
    /// session id is minted.
    pub fn initialize(&mut self, system_instruction: Option<String>) {
        self.history.clear();
        self.system_instruction = system_instruction;
        self.id = SessionId::new();
        info!(
            session = %self.id.short(),
            has_instruction = self.has_instruction(),
            "Session initialized"
        );
    }

    /// Switch persona. Nothing from the old conversation carries over.
    pub fn change_persona(&mut self, system_instruction: Option<String>) {
        self.initialize(system_instruction);
    }

    /// Install a generator built from new configuration and start over.
    pub fn replace_generator(
        &mut self,
        generator: Arc<dyn TextGenerator>,
        system_instruction: Option<String>,
    ) {
        info!(generator = generator.name(), "Generator replaced");
        self.generator = generator;
        self.initialize(system_instruction);
    }

    /// Snapshot of the retained turns, oldest first.
    pub fn history(&self) -> Vec<Turn> {
        self.history.to_vec()
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.history.iter()
    }

    /// The prompt the next generator call would receive for the current history.
    pub fn prompt(&self) -> String {
        flatten_prompt(self.system_instruction.as_deref(), self.history.iter())
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    fn has_instruction(&self) -> bool {
        self.system_instruction
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn max_turns(&self) -> usize {
        self.history.capacity()
    }

    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Token usage reported by generators over the session's lifetime.
    pub fn usage(&self) -> &TokenTracker {
        &self.tracker
    }
}
