//! Client configuration.

/// Base URL of the claude.ai web API.
pub(crate) const CLAUDE_WEB_API_URL: &str = "https://claude.ai/api";

/// The service rejects non-browser clients, so requests identify as one.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for [`ClaudeWebClient`](crate::ClaudeWebClient).
///
/// Defaults match what the web frontend sends; override the base URL to
/// point the client at a proxy or a test server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub model: String,
    pub timezone: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: CLAUDE_WEB_API_URL.to_string(),
            model: "claude-3-opus-20240229".to_string(),
            timezone: "Asia/Shanghai".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }
}
