mod cli;

use std::io::Write;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use claude_web::{
    read_session_key, ClaudeWebClient, ClientConfig, ClientError, ConversationId, ConversationRef,
    OrganizationId,
};

/// Where to look for the session key when no path is given on the command
/// line: the working directory first, then the user config directory.
fn default_key_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("sessionKey.txt")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("claude-web").join("sessionKey.txt"));
    }
    paths
}

fn resolve_key_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    let candidates = default_key_paths();
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        // Keep the primary candidate so the error names a concrete path.
        .unwrap_or_else(|| candidates[0].clone())
}

async fn run(args: cli::Args) -> Result<(), ClientError> {
    let key_path = resolve_key_path(args.session_key_file);
    let session_key = read_session_key(&key_path)?;
    if session_key.is_empty() {
        eprintln!("Session key file {} is empty.", key_path.display());
        std::process::exit(1);
    }
    println!("Session key loaded.");

    let mut config = ClientConfig::new();
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    let client = ClaudeWebClient::with_config(session_key, config);

    let existing = match (args.organization_id, args.conversation_id) {
        (Some(org), Some(conv)) => Some(ConversationRef {
            organization_id: OrganizationId(org),
            conversation_id: ConversationId(conv),
        }),
        _ => None,
    };

    println!("\nSending: '{}'", args.message);
    println!("\nClaude's reply:");
    println!("{}", "=".repeat(50));

    let reply = client
        .chat(&args.message, existing, |fragment| {
            print!("{fragment}");
            let _ = std::io::stdout().flush();
        })
        .await?;

    println!();
    println!("{}", "=".repeat(50));
    println!("\nConversation ID: {}", reply.conversation.conversation_id);
    println!("You can pass --conversation-id/--organization-id to continue this conversation.");

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("claude_web=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "claude_web=info".parse().unwrap()),
            ),
        )
        .init();

    if let Err(e) = run(args).await {
        match e {
            ClientError::CredentialNotFound(path) => {
                eprintln!(
                    "No session key at {}. Save your claude.ai session key there first.",
                    path.display()
                );
            }
            other => eprintln!("Error: {other}"),
        }
        std::process::exit(1);
    }
}
