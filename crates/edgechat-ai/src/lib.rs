//! Conversation engine for edgechat.
//!
//! Provides:
//! - A bounded, role-tagged conversation history
//! - Prompt flattening (persona instruction + history into one text blob)
//! - `ConversationSession`, the submit/record cycle with cancellation
//! - Text generator backends (Gemini over HTTP, offline echo)
//! - Token usage tracking

pub mod echo;
pub mod gemini;
pub mod history;
pub mod prompt;
pub mod session;
pub mod token_tracker;
pub mod turn;

use async_trait::async_trait;

pub use echo::EchoGenerator;
pub use gemini::{GeminiConfig, GeminiGenerator};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use prompt::{flatten_prompt, render_history};
pub use session::{CancelPolicy, ConversationSession, SubmitOutcome};
pub use token_tracker::TokenTracker;
pub use turn::{Role, Turn};

/// Produces text from a single flattened prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend name, used for logging and usage accounting.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<Generation, AiError>;
}

/// Result of one generator call. `text` is `None` when the backend
/// answered without any text.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub text: Option<String>,
    pub usage: TokenUsage,
}

impl Generation {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage: TokenUsage::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

/// The one error a session submission can end in. Displays as
/// `Error: <cause>` so the shell can show it in place of a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error: {message}")]
pub struct GenerationError {
    message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<AiError> for GenerationError {
    fn from(err: AiError) -> Self {
        Self::new(err.to_string())
    }
}
