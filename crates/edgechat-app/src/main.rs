mod cli;
mod command;
mod generator;
mod shell;

use std::path::PathBuf;

use edgechat_config::{toml_loader, EdgechatConfig, ReloadManager};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !key.is_empty() && std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
            }
        }
    }
}

fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let crates = ["edgechat", "edgechat_ai", "edgechat_config", "edgechat_common"];
        let directives: Vec<String> = crates.iter().map(|c| format!("{c}={level}")).collect();
        EnvFilter::new(format!("warn,{}", directives.join(",")))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config_path(arg: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = arg {
        tracing::info!("Using config override: {}", path.display());
        return Some(path);
    }
    match toml_loader::default_config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("No config path available, settings will not persist: {e}");
            None
        }
    }
}

/// Load the config, starting the live reload watcher unless disabled.
fn load_config(
    path: Option<&PathBuf>,
    watch_changes: bool,
) -> (EdgechatConfig, Option<watch::Receiver<EdgechatConfig>>) {
    let Some(path) = path else {
        return (EdgechatConfig::default(), None);
    };
    if watch_changes {
        let (config, rx) = ReloadManager::start(path.clone());
        return (config, Some(rx));
    }
    let config = toml_loader::load_or_create(path).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        EdgechatConfig::default()
    });
    (config, None)
}

async fn run(args: cli::Args) -> edgechat_common::Result<()> {
    let config_path = resolve_config_path(args.config);
    let (config, config_rx) = load_config(config_path.as_ref(), !args.no_watch);

    tracing::debug!("effective config: {}", edgechat_config::config_to_json(&config));

    let shell = shell::Shell::new(config, config_path, args.persona);
    tracing::info!(
        "Session {} ready (provider: {:?}, model: {})",
        shell.session().id().short(),
        shell.config().model.provider,
        shell.config().model.name
    );

    shell::run(shell, config_rx).await?;
    Ok(())
}

fn main() -> edgechat_common::Result<()> {
    // Must run before the runtime spawns worker threads
    load_dotenv();

    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("edgechat v{} starting...", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(args));
    tracing::info!("Shutdown complete");
    result
}
