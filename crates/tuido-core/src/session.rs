//! Session token storage and retrieval.
//!
//! Stores the bearer token in `<base>/session.json` with restricted
//! permissions (0600). The token is never logged or displayed in full.
//!
//! The store is an explicit object handed to whoever needs it (no global
//! state). At most one token exists at a time: saving overwrites, clearing
//! removes the file. There is no client-side expiry; a session ends on
//! `clear` or when the server rejects the token.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Session file name under the tuido home directory.
const SESSION_FILE: &str = "session.json";

/// Opaque bearer token issued by the server at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Full token value, for building the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    fn redacted(&self) -> String {
        let shown: String = self.0.chars().take(8).collect();
        format!("{shown}…")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.redacted())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

/// Errors from the session store.
///
/// Storage failures are propagated, not swallowed: the caller surfaces them
/// the same way as any other failure.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to access session file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the session file.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: SessionToken,
}

/// Durable store for the session token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store rooted at a specific base directory (tests use a temp dir).
    pub fn new(base: &Path) -> Self {
        Self {
            path: base.join(SESSION_FILE),
        }
    }

    /// Store rooted at the tuido home directory.
    pub fn open_default() -> Self {
        Self::new(&paths::tuido_home())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists the token, overwriting any prior value.
    /// Written with restricted permissions (0600) on Unix.
    pub fn save_token(&self, token: &SessionToken) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = SessionFile {
            token: token.clone(),
        };
        let contents = serde_json::to_string_pretty(&file).map_err(|source| SessionError::Parse {
            path: self.path.clone(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .map_err(io_err)?;
            file.write_all(contents.as_bytes()).map_err(io_err)?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents).map_err(io_err)?;
        }

        tracing::debug!(token = %token, "session token saved");
        Ok(())
    }

    /// Reads the persisted token. `None` if never set (or cleared).
    pub fn token(&self) -> Result<Option<SessionToken>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: SessionFile =
            serde_json::from_str(&contents).map_err(|source| SessionError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(file.token))
    }

    /// Removes the stored token. A no-op if none is stored.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(store.token().unwrap().is_none());

        store.save_token(&SessionToken::new("tok123")).unwrap();
        let loaded = store.token().unwrap().unwrap();
        assert_eq!(loaded.secret(), "tok123");
        assert_eq!(loaded.bearer(), "Bearer tok123");
    }

    #[test]
    fn save_overwrites_prior_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store.save_token(&SessionToken::new("first")).unwrap();
        store.save_token(&SessionToken::new("second")).unwrap();

        assert_eq!(store.token().unwrap().unwrap().secret(), "second");
    }

    #[test]
    fn clear_removes_token_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store.save_token(&SessionToken::new("tok")).unwrap();
        store.clear().unwrap();
        assert!(store.token().unwrap().is_none());

        // Clearing again is fine.
        store.clear().unwrap();
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(&dir.path().join("nested").join("home"));

        store.save_token(&SessionToken::new("tok")).unwrap();
        assert!(store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_has_restricted_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save_token(&SessionToken::new("tok")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_session_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.token(), Err(SessionError::Parse { .. })));
    }

    #[test]
    fn display_and_debug_redact_the_token() {
        let token = SessionToken::new("tok123456789-very-secret");
        assert_eq!(token.to_string(), "tok12345…");
        assert!(!format!("{token:?}").contains("very-secret"));
    }
}
