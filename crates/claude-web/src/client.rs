//! Conversation client: organization lookup, conversation creation, and
//! message dispatch against the claude.ai web API.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::{ClientConfig, USER_AGENT};
use crate::streaming::decode_completion_response;
use crate::{ClientError, SessionKey};

/// Remote-assigned identifier scoping conversations to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

/// Remote-assigned identifier addressing one chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully resolved message target.
///
/// The organization id is only discoverable through the bootstrap path, so
/// reusing an existing conversation requires the caller to supply both
/// identifiers together; carrying them as one value makes it impossible to
/// reach dispatch with only half of the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRef {
    pub organization_id: OrganizationId,
    pub conversation_id: ConversationId,
}

/// One entry of the `/organizations` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub uuid: OrganizationId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CreatedConversation {
    uuid: ConversationId,
}

/// The aggregated reply to one message, with the conversation it landed in
/// so the caller can continue the thread later.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub conversation: ConversationRef,
    pub text: String,
}

/// claude.ai web API client authenticated by session cookie.
pub struct ClaudeWebClient {
    config: ClientConfig,
    session_key: SessionKey,
    http: reqwest::Client,
}

impl ClaudeWebClient {
    pub fn new(session_key: SessionKey) -> Self {
        Self::with_config(session_key, ClientConfig::default())
    }

    pub fn with_config(session_key: SessionKey, config: ClientConfig) -> Self {
        Self {
            config,
            session_key,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Headers carried on every request: JSON content negotiation, the
    /// session cookie, and a browser user-agent (the service rejects
    /// non-browser clients).
    ///
    /// Fails when the session key contains bytes that cannot appear in a
    /// header value (interior control bytes); the key itself is otherwise
    /// forwarded as-is.
    fn request_headers(
        &self,
    ) -> Result<reqwest::header::HeaderMap, reqwest::header::InvalidHeaderValue> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::COOKIE,
            format!("sessionKey={}", self.session_key.as_str()).parse()?,
        );
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        Ok(headers)
    }

    /// List the organizations the session key has access to.
    pub async fn organizations(&self) -> Result<Vec<Organization>, ClientError> {
        debug!("listing organizations");

        let headers = self
            .request_headers()
            .map_err(|e| ClientError::SessionCreationFailed(format!("session key: {e}")))?;
        let response = self
            .http
            .get(format!("{}/organizations", self.config.base_url))
            .headers(headers)
            .send()
            .await
            .map_err(|e| ClientError::SessionCreationFailed(e.to_string()))?;
        let response = check_status(response, ClientError::SessionCreationFailed).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::SessionCreationFailed(e.to_string()))
    }

    /// First-wins organization selection, in the order the service listed
    /// them. An empty listing means the key grants access to nothing.
    pub fn first_organization(
        organizations: Vec<Organization>,
    ) -> Result<OrganizationId, ClientError> {
        organizations
            .into_iter()
            .next()
            .map(|org| org.uuid)
            .ok_or(ClientError::NoOrganization)
    }

    /// Create a new conversation (empty display name) in `organization_id`
    /// and return the remote-assigned identifier.
    pub async fn create_conversation(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<ConversationId, ClientError> {
        debug!(organization = %organization_id, "creating conversation");

        let body = json!({
            "name": "",
            "organization_id": organization_id,
        });
        let headers = self
            .request_headers()
            .map_err(|e| ClientError::SessionCreationFailed(format!("session key: {e}")))?;
        let response = self
            .http
            .post(format!(
                "{}/organizations/{}/chat_conversations",
                self.config.base_url, organization_id
            ))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::SessionCreationFailed(e.to_string()))?;
        let response = check_status(response, ClientError::SessionCreationFailed).await?;

        let created: CreatedConversation = response
            .json()
            .await
            .map_err(|e| ClientError::SessionCreationFailed(e.to_string()))?;
        Ok(created.uuid)
    }

    /// Reuse `existing` when supplied, otherwise bootstrap: take the first
    /// listed organization and create a fresh conversation in it.
    pub async fn resolve_conversation(
        &self,
        existing: Option<ConversationRef>,
    ) -> Result<ConversationRef, ClientError> {
        if let Some(target) = existing {
            return Ok(target);
        }

        let organization_id = Self::first_organization(self.organizations().await?)?;
        let conversation_id = self.create_conversation(&organization_id).await?;
        Ok(ConversationRef {
            organization_id,
            conversation_id,
        })
    }

    /// The `append_message` request body. Field names and the fixed
    /// defaults (empty prompt, empty attachments) are part of the wire
    /// contract; model and timezone come from the configuration.
    fn build_message_body(&self, target: &ConversationRef, text: &str) -> serde_json::Value {
        json!({
            "attachments": [],
            "completion": {
                "prompt": "",
                "timezone": self.config.timezone,
                "model": self.config.model,
            },
            "organization_id": target.organization_id,
            "conversation_id": target.conversation_id,
            "text": text,
        })
    }

    /// Send one message to a resolved conversation and decode the streamed
    /// reply, calling `on_fragment` for each text fragment as it arrives.
    /// Returns the aggregated reply text. No retry is attempted.
    pub async fn send_message(
        &self,
        target: &ConversationRef,
        text: &str,
        on_fragment: impl FnMut(&str),
    ) -> Result<String, ClientError> {
        let body = self.build_message_body(target, text);

        debug!(
            model = %self.config.model,
            conversation = %target.conversation_id,
            "sending message"
        );

        let headers = self
            .request_headers()
            .map_err(|e| ClientError::MessageSendFailed(format!("session key: {e}")))?;
        let response = self
            .http
            .post(format!("{}/append_message", self.config.base_url))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::MessageSendFailed(e.to_string()))?;
        let response = check_status(response, ClientError::MessageSendFailed).await?;

        decode_completion_response(response, on_fragment).await
    }

    /// Resolve-or-reuse, send, aggregate: the whole single-shot flow.
    pub async fn chat(
        &self,
        text: &str,
        existing: Option<ConversationRef>,
        on_fragment: impl FnMut(&str),
    ) -> Result<ChatReply, ClientError> {
        let conversation = self.resolve_conversation(existing).await?;
        let text = self.send_message(&conversation, text, on_fragment).await?;
        Ok(ChatReply { conversation, text })
    }
}

/// Map a non-2xx response to `wrap`, keeping a truncated body excerpt as
/// the cause.
async fn check_status(
    response: reqwest::Response,
    wrap: fn(String) -> ClientError,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let text = text.chars().take(200).collect::<String>();
        return Err(wrap(format!("HTTP {status}: {text}")));
    }
    Ok(response)
}
