//! Sampling parameters handed to the text generator.

use serde::{Deserialize, Serialize};

/// Generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Sampling temperature (valid range: 0.0-1.0).
    pub temperature: f64,
    /// Top-k sampling cutoff (valid range: 1-100).
    pub top_k: u32,
    /// Upper bound on generated tokens (valid range: 1-8192).
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 16,
            max_output_tokens: 256,
        }
    }
}
