//! Offline generator that answers with the user's latest line.
//!
//! Lets the chat shell run without network access or credentials.

use async_trait::async_trait;

use crate::{AiError, Generation, TextGenerator, TokenUsage};

#[derive(Debug, Clone, Default)]
pub struct EchoGenerator;

impl EchoGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, AiError> {
        let last_user = prompt
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("User: "));

        let usage = TokenUsage {
            input_tokens: prompt.split_whitespace().count() as u64,
            output_tokens: last_user.map_or(0, |t| t.split_whitespace().count() as u64),
        };

        Ok(Generation {
            text: last_user.map(|t| format!("You said: {t}")),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_latest_user_line() {
        let generator = EchoGenerator::new();
        let out = generator
            .generate("Be terse.\n\nUser: Hi\nAI: Hello\nUser: How are you?")
            .await
            .unwrap();
        assert_eq!(out.text.as_deref(), Some("You said: How are you?"));
        assert_eq!(out.usage.output_tokens, 3);
    }

    #[tokio::test]
    async fn no_user_line_yields_no_text() {
        let generator = EchoGenerator::new();
        let out = generator.generate("Be terse.").await.unwrap();
        assert!(out.text.is_none());
    }
}
