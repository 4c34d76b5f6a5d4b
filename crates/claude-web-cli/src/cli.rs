use std::path::PathBuf;

use clap::Parser;

/// Send a message to claude.ai with a saved session key and stream the
/// reply.
#[derive(Parser, Debug)]
#[command(name = "claude-web", version, about)]
pub struct Args {
    /// The message to send.
    #[arg(default_value = "Hello, Claude! Please briefly introduce yourself.")]
    pub message: String,

    /// Path to the session key file. Defaults to ./sessionKey.txt, then
    /// ~/.config/claude-web/sessionKey.txt.
    #[arg(short = 'k', long)]
    pub session_key_file: Option<PathBuf>,

    /// Reuse an existing conversation (requires --organization-id).
    #[arg(long, requires = "organization_id")]
    pub conversation_id: Option<String>,

    /// Organization the reused conversation belongs to.
    #[arg(long, requires = "conversation_id")]
    pub organization_id: Option<String>,

    /// Model selector override.
    #[arg(long)]
    pub model: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
