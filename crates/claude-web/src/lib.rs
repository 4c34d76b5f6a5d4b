//! Client for the claude.ai web API using a saved session key.
//!
//! Given a session key previously captured from a browser login, this crate
//! can:
//! - resolve the organization the key belongs to,
//! - create a conversation (or reuse an existing one),
//! - send a message and decode the streamed reply incrementally.
//!
//! One message per call, one thread of control: every remote call happens
//! strictly after the previous one completes, and the streamed reply is
//! pulled one line at a time.

pub mod client;
pub mod config;
pub mod credentials;
pub mod streaming;

pub use client::{ChatReply, ClaudeWebClient, ConversationId, ConversationRef, OrganizationId};
pub use config::ClientConfig;
pub use credentials::{read_session_key, SessionKey};
pub use streaming::decode_completion_stream;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("session key file not found: {0}")]
    CredentialNotFound(PathBuf),
    #[error("no organization is associated with this session key")]
    NoOrganization,
    #[error("session creation failed: {0}")]
    SessionCreationFailed(String),
    #[error("message sending failed: {0}")]
    MessageSendFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
