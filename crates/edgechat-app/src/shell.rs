//! Interactive chat shell: reads lines, drives the conversation session,
//! and applies configuration changes.

use std::io::Write;
use std::path::PathBuf;

use edgechat_ai::{render_history, CancelPolicy, ConversationSession, SubmitOutcome};
use edgechat_config::{save_config_to_path, validation, EdgechatConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{Command, SettingKey, HELP};
use crate::generator::build_generator;

/// What the shell wants shown after handling a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Model output.
    Response(String),
    /// A failure, already worded for display.
    Error(String),
    /// Informational text from the shell itself.
    Notice(String),
    Quit,
}

pub struct Shell {
    config: EdgechatConfig,
    /// Where `/set` persists changes; `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    session: ConversationSession,
    persona_index: usize,
}

impl Shell {
    pub fn new(
        config: EdgechatConfig,
        config_path: Option<PathBuf>,
        persona_override: Option<usize>,
    ) -> Self {
        let requested = persona_override.unwrap_or(config.personas.selected);
        let persona_index = resolve_persona(&config, requested);
        let session = build_session(&config, persona_index);
        Self {
            config,
            config_path,
            session,
            persona_index,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn config(&self) -> &EdgechatConfig {
        &self.config
    }

    /// Handle one input line. Chat submissions race against `cancel`.
    pub async fn handle_line(&mut self, line: &str, cancel: &CancellationToken) -> Reply {
        match Command::parse(line) {
            Command::Empty => Reply::Notice("Prompt is empty.".to_string()),
            Command::Chat(text) => match self.session.submit_cancellable(text, cancel).await {
                SubmitOutcome::Completed(text) => Reply::Response(text),
                SubmitOutcome::Failed(e) => Reply::Error(e.to_string()),
                SubmitOutcome::Cancelled => Reply::Notice("Generation cancelled.".to_string()),
            },
            Command::Personas => Reply::Notice(self.persona_listing()),
            Command::Persona(arg) => self.switch_persona(&arg),
            Command::History => {
                let rendered = render_history(self.session.turns());
                if rendered.is_empty() {
                    Reply::Notice("No history yet.".to_string())
                } else {
                    Reply::Notice(rendered)
                }
            }
            Command::Config => Reply::Notice(self.config_summary()),
            Command::Set { key, value } => self.update_setting(key, &value),
            Command::Help => Reply::Notice(HELP.to_string()),
            Command::Quit => Reply::Quit,
            Command::Invalid(msg) => Reply::Error(msg),
        }
    }

    /// Adopt a new configuration. Returns `None` when nothing changed.
    ///
    /// Any change rebuilds the generator and starts a new conversation.
    /// Token usage carries over.
    pub fn apply_config(&mut self, config: EdgechatConfig) -> Option<Reply> {
        if config == self.config {
            debug!("config unchanged, keeping session");
            return None;
        }

        let session_settings_changed = config.session != self.config.session;
        if config.personas.selected != self.config.personas.selected {
            self.persona_index = config.personas.selected;
        }
        self.config = config;
        self.persona_index = resolve_persona(&self.config, self.persona_index);

        if session_settings_changed {
            self.session.reconfigure(
                self.config.session.max_turns as usize,
                CancelPolicy::from_rollback_flag(self.config.session.rollback_on_cancel),
            );
        }
        let instruction = self.instruction();
        self.session.replace_generator(build_generator(&self.config), instruction);
        info!("configuration applied, conversation reset");
        Some(Reply::Notice("Configuration changed. Chat cleared.".to_string()))
    }

    fn instruction(&self) -> Option<String> {
        persona_instruction(&self.config, self.persona_index)
    }

    fn persona_listing(&self) -> String {
        if self.config.personas.list.is_empty() {
            return "No personas configured.".to_string();
        }
        self.config
            .personas
            .list
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let marker = if i == self.persona_index { '*' } else { ' ' };
                format!("{marker} {i}: {}", p.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn switch_persona(&mut self, arg: &str) -> Reply {
        let personas = &self.config.personas;
        let index = match arg.trim().parse::<usize>() {
            Ok(i) if i < personas.list.len() => Some(i),
            Ok(_) => None,
            Err(_) => personas.position(arg),
        };
        let Some(index) = index else {
            return Reply::Error(format!(
                "Unknown persona '{}'. Use /personas to list them.",
                arg.trim()
            ));
        };

        self.persona_index = index;
        let instruction = self.instruction();
        self.session.change_persona(instruction);
        Reply::Notice("Persona changed. Chat cleared.".to_string())
    }

    fn config_summary(&self) -> String {
        let persona = self
            .config
            .personas
            .list
            .get(self.persona_index)
            .map_or("(none)", |p| p.name.as_str());
        let generation = &self.config.generation;
        let usage = self.session.usage();
        [
            format!(
                "generator = {} ({})",
                self.session.generator_name(),
                self.config.model.name
            ),
            format!("persona = {persona}"),
            format!("temperature = {}", generation.temperature),
            format!("top_k = {}", generation.top_k),
            format!("max_output_tokens = {}", generation.max_output_tokens),
            format!("max_turns = {}", self.session.max_turns()),
            format!(
                "usage = {} tokens over {} calls ({} on {})",
                usage.total_tokens(),
                usage.call_count(),
                usage
                    .for_generator(self.session.generator_name())
                    .map_or(0, |u| u.total_tokens()),
                self.session.generator_name()
            ),
        ]
        .join("\n")
    }

    fn update_setting(&mut self, key: SettingKey, value: &str) -> Reply {
        let mut candidate = self.config.clone();
        let parsed = match key {
            SettingKey::Temperature => value
                .parse::<f64>()
                .map(|v| candidate.generation.temperature = v)
                .map_err(|e| e.to_string()),
            SettingKey::TopK => value
                .parse::<u32>()
                .map(|v| candidate.generation.top_k = v)
                .map_err(|e| e.to_string()),
            SettingKey::MaxOutputTokens => value
                .parse::<u32>()
                .map(|v| candidate.generation.max_output_tokens = v)
                .map_err(|e| e.to_string()),
        };
        if let Err(e) = parsed {
            return Reply::Error(format!("Invalid value '{value}' for {key}: {e}"));
        }
        if let Err(e) = validation::validate_field(&candidate, &format!("generation.{key}")) {
            return Reply::Error(format!("Rejected: {e}"));
        }

        if let Some(path) = &self.config_path {
            if let Err(e) = save_config_to_path(&candidate, path) {
                warn!("failed to save config: {e}");
                return Reply::Error(format!("Could not save config: {e}"));
            }
        }

        self.apply_config(candidate)
            .unwrap_or_else(|| Reply::Notice(format!("{key} unchanged.")))
    }
}

fn resolve_persona(config: &EdgechatConfig, index: usize) -> usize {
    if index < config.personas.list.len() {
        index
    } else {
        0
    }
}

fn persona_instruction(config: &EdgechatConfig, index: usize) -> Option<String> {
    config
        .personas
        .get_or_first(index)
        .map(|p| p.instruction.clone())
}

fn build_session(config: &EdgechatConfig, persona_index: usize) -> ConversationSession {
    ConversationSession::new(
        build_generator(config),
        persona_instruction(config, persona_index),
    )
    .with_max_turns(config.session.max_turns as usize)
    .with_cancel_policy(CancelPolicy::from_rollback_flag(
        config.session.rollback_on_cancel,
    ))
}

/// Receive the next config from the reload manager. Pends forever when
/// reloading is off or the manager has stopped.
async fn next_config(
    rx: &mut Option<watch::Receiver<EdgechatConfig>>,
) -> Option<EdgechatConfig> {
    let Some(receiver) = rx.as_mut() else {
        return std::future::pending().await;
    };
    let changed = receiver.changed().await;
    match changed {
        Ok(()) => Some(receiver.borrow_and_update().clone()),
        Err(_) => {
            debug!("config reload channel closed");
            *rx = None;
            None
        }
    }
}

fn show(reply: &Reply) {
    match reply {
        Reply::Response(text) | Reply::Notice(text) | Reply::Error(text) => println!("{text}"),
        Reply::Quit => {}
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Run the read-eval-print loop until `/quit`, end of input, or Ctrl-C
/// while idle.
pub async fn run(
    mut shell: Shell,
    mut config_rx: Option<watch::Receiver<EdgechatConfig>>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type /help for commands.");
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                let cancel = CancellationToken::new();
                let reply = {
                    let handling = shell.handle_line(&line, &cancel);
                    tokio::pin!(handling);
                    loop {
                        tokio::select! {
                            reply = &mut handling => break reply,
                            _ = tokio::signal::ctrl_c() => {
                                debug!("Ctrl-C received, cancelling generation");
                                cancel.cancel();
                            }
                        }
                    }
                };

                if reply == Reply::Quit {
                    break;
                }
                show(&reply);
                prompt();
            }
            config = next_config(&mut config_rx) => {
                if let Some(reply) = config.and_then(|c| shell.apply_config(c)) {
                    println!();
                    show(&reply);
                    prompt();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    info!("shell exiting");
    Ok(())
}
