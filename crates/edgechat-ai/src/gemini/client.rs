//! Gemini generator struct, request building, and response parsing.

use std::time::Duration;

use crate::{AiError, Generation, TokenUsage};

use super::config::GeminiConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini text generator.
pub struct GeminiGenerator {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.config.model)
    }

    /// Build the JSON request body: the whole flattened prompt is one user content.
    pub(crate) fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "topK": self.config.top_k,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        })
    }

    /// Parse a `generateContent` response.
    ///
    /// Text parts of the first candidate are concatenated; a candidate with
    /// no text parts (e.g. stopped by a safety filter) yields `text: None`.
    pub(crate) fn parse_response(&self, json: &serde_json::Value) -> Result<Generation, AiError> {
        let candidates = json["candidates"].as_array().ok_or_else(|| {
            let reason = json["promptFeedback"]["blockReason"]
                .as_str()
                .map(|r| format!("prompt blocked: {r}"))
                .unwrap_or_else(|| "no candidates in response".to_string());
            AiError::ParseError(reason)
        })?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let mut text: Option<String> = None;
        if let Some(parts) = first["content"]["parts"].as_array() {
            for part in parts {
                if let Some(t) = part["text"].as_str() {
                    text.get_or_insert_with(String::new).push_str(t);
                }
            }
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(Generation { text, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> GeminiGenerator {
        let config = GeminiConfig::new("test-key")
            .with_temperature(0.5)
            .with_top_k(8)
            .with_max_output_tokens(128);
        GeminiGenerator::new(config).unwrap()
    }

    #[test]
    fn api_url_names_model() {
        assert_eq!(
            generator().api_url(),
            concat!(
                "https://generativelanguage.googleapis.com/v1beta/models/",
                "gemini-2.0-flash:generateContent"
            )
        );
    }

    #[test]
    fn request_body_carries_prompt_and_config() {
        let body = generator().build_request_body("Be terse.\n\nUser: Hi");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Be terse.\n\nUser: Hi");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
        assert_eq!(body["generationConfig"]["topK"], 8);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 128);
    }

    #[test]
    fn parse_joins_text_parts_and_usage() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello" }, { "text": " there" }] }
            }],
            "usageMetadata": { "promptTokenCount": 7, "candidatesTokenCount": 2 }
        });
        let out = generator().parse_response(&json).unwrap();
        assert_eq!(out.text.as_deref(), Some("Hello there"));
        assert_eq!(out.usage.input_tokens, 7);
        assert_eq!(out.usage.output_tokens, 2);
    }

    #[test]
    fn parse_candidate_without_text_is_none() {
        let json = serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        });
        let out = generator().parse_response(&json).unwrap();
        assert!(out.text.is_none());
        assert_eq!(out.usage, TokenUsage::default());
    }

    #[test]
    fn parse_without_candidates_fails() {
        let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = generator().parse_response(&json).unwrap_err();
        assert!(matches!(err, AiError::ParseError(ref m) if m == "prompt blocked: SAFETY"));

        let err = generator()
            .parse_response(&serde_json::json!({ "candidates": [] }))
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(ref m) if m == "empty candidates"));
    }
}
