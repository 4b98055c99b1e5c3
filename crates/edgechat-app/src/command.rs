//! Parsing of shell input lines into chat messages and slash commands.

use std::fmt;
use std::str::FromStr;

pub const HELP: &str = "\
Type a message and press Enter to chat.

Commands:
  /personas              list personas
  /persona <index|name>  switch persona (clears the chat)
  /history               show the conversation history
  /config                show the generation configuration
  /set <key> <value>     change temperature, top_k or max_output_tokens
  /help                  show this help
  /quit                  exit

Ctrl-C cancels a running generation. Start a message with // to send a
literal leading slash.";

/// A generation setting editable from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Temperature,
    TopK,
    MaxOutputTokens,
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "temperature" => Ok(Self::Temperature),
            "top_k" | "topk" => Ok(Self::TopK),
            "max_output_tokens" | "max_tokens" => Ok(Self::MaxOutputTokens),
            other => Err(format!(
                "Unknown setting '{other}'. Expected temperature, top_k or max_output_tokens."
            )),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "temperature",
            Self::TopK => "top_k",
            Self::MaxOutputTokens => "max_output_tokens",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text to send to the model.
    Chat(String),
    /// Blank input.
    Empty,
    Personas,
    Persona(String),
    History,
    Config,
    Set { key: SettingKey, value: String },
    Help,
    Quit,
    /// A malformed command, with the message to show.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Chat(line.to_string());
        };
        if rest.starts_with('/') {
            return Self::Chat(rest.to_string());
        }

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match (name, args.as_slice()) {
            ("personas", []) => Self::Personas,
            ("persona", []) => Self::Invalid("Usage: /persona <index|name>".to_string()),
            ("persona", words) => Self::Persona(words.join(" ")),
            ("history", []) => Self::History,
            ("config", []) => Self::Config,
            ("set", [key, value]) => match key.parse() {
                Ok(key) => Self::Set {
                    key,
                    value: (*value).to_string(),
                },
                Err(msg) => Self::Invalid(msg),
            },
            ("set", _) => Self::Invalid("Usage: /set <key> <value>".to_string()),
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", _) => Self::Quit,
            (other, _) => Self::Invalid(format!("Unknown command '/{other}'. Type /help.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_chat_and_kept_verbatim() {
        assert_eq!(Command::parse("  Hello there "), Command::Chat("  Hello there ".into()));
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   \t"), Command::Empty);
    }

    #[test]
    fn double_slash_escapes_a_command() {
        assert_eq!(Command::parse("//help me"), Command::Chat("/help me".into()));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(Command::parse("/personas"), Command::Personas);
        assert_eq!(Command::parse("/history"), Command::History);
        assert_eq!(Command::parse("/config"), Command::Config);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse(" /exit "), Command::Quit);
    }

    #[test]
    fn persona_takes_index_or_multiword_name() {
        assert_eq!(Command::parse("/persona 2"), Command::Persona("2".into()));
        assert_eq!(
            Command::parse("/persona Terse  Expert"),
            Command::Persona("Terse Expert".into())
        );
        assert!(matches!(Command::parse("/persona"), Command::Invalid(_)));
    }

    #[test]
    fn set_parses_key_and_value() {
        assert_eq!(
            Command::parse("/set top-k 40"),
            Command::Set {
                key: SettingKey::TopK,
                value: "40".into()
            }
        );
        assert!(matches!(Command::parse("/set temperature"), Command::Invalid(_)));
        let unknown = Command::parse("/set colour red");
        assert!(matches!(unknown, Command::Invalid(ref m) if m.contains("colour")));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(
            matches!(Command::parse("/dance"), Command::Invalid(ref m) if m.contains("/dance"))
        );
    }

    #[test]
    fn setting_key_display_matches_config_field() {
        assert_eq!(SettingKey::MaxOutputTokens.to_string(), "max_output_tokens");
        assert_eq!("max_tokens".parse::<SettingKey>(), Ok(SettingKey::MaxOutputTokens));
    }
}
