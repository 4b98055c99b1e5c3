//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# edgechat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[generation]
# temperature = 0.2        # 0.0-1.0
# top_k = 16               # 1-100
# max_output_tokens = 256  # 1-8192

[model]
# provider = "gemini"      # gemini, echo
# name = "gemini-2.0-flash"
# api_key_env = "GEMINI_API_KEY"

[session]
# max_turns = 10           # 1-100, user and assistant turns combined
# rollback_on_cancel = false

[personas]
# selected = 0

# Defining any [[personas.list]] entry replaces the built-in personas.
# [[personas.list]]
# name = "Helpful Assistant"
# instruction = "You are a helpful assistant. Answer clearly and concisely."
"##
    .to_string()
}
