//! Persisted authentication session.
//!
//! The client keeps a single auth record (`token`, user id, name, email)
//! under a well-known local key — a JSON file in the user config
//! directory. It is read once at session start, written on login, and
//! cleared on logout. The reconciliation layer only consumes it for the
//! active user id.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use schedai_proto::task::UserId;

/// Errors that can occur reading or writing the session file.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to read or write the session file.
    #[error("failed to access session file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The stored session is not valid JSON of the expected shape.
    #[error("failed to parse session file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Could not determine the user's config directory.
    #[error("could not determine config directory (no HOME or XDG_CONFIG_HOME)")]
    NoConfigDir,
}

/// The stored auth record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token issued at login.
    pub token: String,
    /// Backend-assigned user id.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

/// Builds a [`StoredSession`] from a login response record.
///
/// Returns `None` when the record lacks a token or user id; `name` and
/// `email` degrade to empty strings, matching the tolerance of the rest
/// of the inbound path.
#[must_use]
pub fn session_from_login(record: &Value) -> Option<StoredSession> {
    let token = record.get("token").and_then(Value::as_str)?;
    let user_id = record.get("user_id").and_then(UserId::from_value)?;
    Some(StoredSession {
        token: token.to_string(),
        user_id,
        name: string_or_empty(record, "name"),
        email: string_or_empty(record, "email"),
    })
}

fn string_or_empty(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Owns the on-disk location of the session record.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Creates a session file handle at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a handle at the default location
    /// (`~/.config/schedai/session.json`).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoConfigDir`] when no config directory can
    /// be determined.
    pub fn at_default_path() -> Result<Self, SessionError> {
        let config_dir = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
        Ok(Self {
            path: config_dir.join("schedai").join("session.json"),
        })
    }

    /// Returns the path this handle reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, if any.
    ///
    /// A missing file is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Writes the session record, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] on I/O or serialization failure.
    pub fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents).map_err(|e| SessionError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Removes the stored session. Clearing an absent session is fine.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] on any failure other than the file
    /// already being gone.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
