use std::path::PathBuf;

use clap::Parser;

/// edgechat: a terminal chat over a pluggable text generator, with personas
/// and a bounded conversation history.
#[derive(Parser, Debug)]
#[command(name = "edgechat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start with the persona at this index instead of the configured one.
    #[arg(short = 'p', long)]
    pub persona: Option<usize>,

    /// Do not reload the config file when it changes on disk.
    #[arg(long)]
    pub no_watch: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
