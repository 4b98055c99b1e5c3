//! Validation for the generation and model sections.

use crate::schema::EdgechatConfig;

use super::helpers::{validate_range, validate_range_f64};

/// Validate sampling parameters.
pub(crate) fn validate_generation(errors: &mut Vec<String>, config: &EdgechatConfig) {
    validate_range_f64(
        errors,
        "generation.temperature",
        config.generation.temperature,
        0.0,
        1.0,
    );
    validate_range(errors, "generation.top_k", config.generation.top_k, 1, 100);
    validate_range(
        errors,
        "generation.max_output_tokens",
        config.generation.max_output_tokens,
        1,
        8192,
    );
}

/// Validate model selection.
pub(crate) fn validate_model(errors: &mut Vec<String>, config: &EdgechatConfig) {
    if config.model.name.trim().is_empty() {
        errors.push("model.name must not be empty".to_string());
    }
    if config.model.api_key_env.trim().is_empty() {
        errors.push("model.api_key_env must not be empty".to_string());
    }
}
