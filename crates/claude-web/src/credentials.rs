//! Session key loading.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::ClientError;

/// An opaque claude.ai session key.
///
/// No shape validation is performed; whatever the credential file contains
/// (minus surrounding whitespace) is forwarded to the service as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionKey").field(&"[REDACTED]").finish()
    }
}

/// Read a saved session key from `path`, trimming surrounding whitespace.
///
/// A missing file is reported as [`ClientError::CredentialNotFound`] so the
/// caller can abort gracefully before any network call is attempted.
pub fn read_session_key(path: impl AsRef<Path>) -> Result<SessionKey, ClientError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => Ok(SessionKey::new(contents.trim())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "session key file not found");
            Err(ClientError::CredentialNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: write `contents` to a scratch file and return its path.
    fn scratch_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("claude_web_credentials_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn key_is_trimmed() {
        let path = scratch_file("padded.txt", "\n  sk-ant-sid01-abcdef  \n\n");
        let key = read_session_key(&path).unwrap();
        assert_eq!(key.as_str(), "sk-ant-sid01-abcdef");
    }

    #[test]
    fn bare_key_loads_as_is() {
        let path = scratch_file("bare.txt", "sk-ant-sid01-abcdef");
        let key = read_session_key(&path).unwrap();
        assert_eq!(key.as_str(), "sk-ant-sid01-abcdef");
    }

    #[test]
    fn whitespace_only_file_yields_empty_key() {
        let path = scratch_file("blank.txt", "  \n");
        let key = read_session_key(&path).unwrap();
        assert!(key.is_empty());
    }

    #[test]
    fn missing_file_is_credential_not_found() {
        let path = std::env::temp_dir()
            .join("claude_web_credentials_test")
            .join("does_not_exist.txt");
        let err = read_session_key(&path).unwrap_err();
        assert!(matches!(err, ClientError::CredentialNotFound(p) if p == path));
    }

    #[test]
    fn debug_redacts_the_key() {
        let key = SessionKey::new("sk-ant-sid01-secret");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
