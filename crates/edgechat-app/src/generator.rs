//! Builds the text generator described by the configuration.

use std::sync::Arc;

use edgechat_ai::{AiError, EchoGenerator, GeminiConfig, GeminiGenerator, TextGenerator};
use edgechat_config::{EdgechatConfig, ModelProvider};
use tracing::{info, warn};

/// Build the configured generator, or fail if it cannot run (e.g. no API key).
pub fn try_build_generator(config: &EdgechatConfig) -> Result<Arc<dyn TextGenerator>, AiError> {
    match config.model.provider {
        ModelProvider::Gemini => {
            let gemini = GeminiConfig::from_env(&config.model.api_key_env)?
                .with_model(config.model.name.clone())
                .with_temperature(config.generation.temperature)
                .with_top_k(config.generation.top_k)
                .with_max_output_tokens(config.generation.max_output_tokens);
            info!(model = %gemini.model, "Using Gemini generator");
            Ok(Arc::new(GeminiGenerator::new(gemini)?))
        }
        ModelProvider::Echo => {
            info!("Using offline echo generator");
            Ok(Arc::new(EchoGenerator::new()))
        }
    }
}

/// Build the configured generator, falling back to the offline echo
/// generator when it cannot be built.
pub fn build_generator(config: &EdgechatConfig) -> Arc<dyn TextGenerator> {
    try_build_generator(config).unwrap_or_else(|e| {
        warn!(
            "cannot start {:?} generator ({e}), falling back to offline echo",
            config.model.provider
        );
        Arc::new(EchoGenerator::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_provider_builds_echo() {
        let mut config = EdgechatConfig::default();
        config.model.provider = ModelProvider::Echo;
        assert_eq!(try_build_generator(&config).unwrap().name(), "echo");
    }

    #[test]
    fn gemini_without_key_is_not_configured() {
        let mut config = EdgechatConfig::default();
        config.model.api_key_env = "EDGECHAT_TEST_MISSING_GEMINI_KEY".into();
        let err = try_build_generator(&config).err().unwrap();
        assert!(matches!(err, AiError::NotConfigured(_)));
    }

    #[test]
    fn gemini_without_key_falls_back_to_echo() {
        let mut config = EdgechatConfig::default();
        config.model.api_key_env = "EDGECHAT_TEST_MISSING_GEMINI_KEY".into();
        assert_eq!(build_generator(&config).name(), "echo");
    }
}
