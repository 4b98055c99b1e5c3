//! Full configuration validation.
//!
//! Validates numeric ranges and the persona catalogue. Each section has
//! its own submodule; this orchestrator calls them all and collects
//! errors into a single `ConfigError`.

mod generation;
mod helpers;
mod session;


use crate::schema::EdgechatConfig;
use edgechat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EdgechatConfig) -> Result<(), ConfigError> {
    into_result(collect_errors(config))
}

/// Validate a single dotted field (e.g. `generation.top_k`), ignoring
/// problems elsewhere in the config.
pub fn validate_field(config: &EdgechatConfig, field: &str) -> Result<(), ConfigError> {
    let prefix = format!("{field} ");
    let errors = collect_errors(config)
        .into_iter()
        .filter(|e| e.starts_with(&prefix))
        .collect();
    into_result(errors)
}

fn collect_errors(config: &EdgechatConfig) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    generation::validate_generation(&mut errors, config);
    generation::validate_model(&mut errors, config);
    session::validate_session(&mut errors, config);
    session::validate_personas(&mut errors, config);

    errors
}

fn into_result(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
