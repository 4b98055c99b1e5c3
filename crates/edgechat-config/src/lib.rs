//! edgechat configuration system.
//!
//! Provides TOML-based configuration with live reload and full
//! validation. All config sections use sensible defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use edgechat_config::{config_to_json, toml_loader};
//!
//! let config = toml_loader::load_or_create(Path::new("config.toml")).unwrap_or_default();
//! println!("{}", config_to_json(&config));
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{
    EdgechatConfig, GenerationConfig, ModelConfig, ModelProvider, Persona, PersonasConfig,
    SessionConfig,
};
pub use toml_writer::save_config_to_path;
pub use watcher::ConfigWatcher;

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &EdgechatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
