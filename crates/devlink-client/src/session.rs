//! Persisted session state
//!
//! One process-wide session store with explicit lifecycle: `load` on boot
//! reads the persisted token, `save` after login writes it, `clear` on
//! logout removes it. Components receive the store by reference instead of
//! reading globals.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// The authenticated session: who is logged in and with which tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// File-persisted session store
///
/// Reads and writes survive process restarts; the in-memory copy is behind a
/// lock so the API client and UI can share one store.
#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Boot-time init: read the persisted session if one exists
    pub fn load(&self) -> ClientResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                // A corrupt session file means logging in again, not crashing
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt session file");
                let _ = std::fs::remove_file(&self.path);
                return Ok(None);
            }
        };

        *self.current.write().expect("session lock poisoned") = Some(session.clone());
        Ok(Some(session))
    }

    /// Persist a new session (after login or token refresh)
    pub fn save(&self, session: Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&session)
            .expect("session serialization cannot fail");
        std::fs::write(&self.path, raw)?;

        *self.current.write().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    /// Logout teardown: forget the session and delete the file
    pub fn clear(&self) -> ClientResult<()> {
        *self.current.write().expect("session lock poisoned") = None;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// The current in-memory session, if any
    pub fn current(&self) -> Option<Session> {
        self.current.read().expect("session lock poisoned").clone()
    }

    /// The current access token, if logged in
    pub fn access_token(&self) -> Option<String> {
        self.current().map(|s| s.access_token)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("path", &self.path)
            .field("logged_in", &self.current().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("devlink-session-test-{name}-{}.json", std::process::id()))
    }

    fn sample_session() -> Session {
        Session {
            user_id: "42".to_string(),
            username: "alice".to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = temp_path("roundtrip");
        let store = SessionStore::new(&path);

        store.save(sample_session()).unwrap();

        // A fresh store simulates a process restart
        let restarted = SessionStore::new(&path);
        let loaded = restarted.load().unwrap();
        assert_eq!(loaded, Some(sample_session()));
        assert_eq!(restarted.access_token().as_deref(), Some("access"));

        store.clear().unwrap();
    }

    #[test]
    fn test_clear_removes_file() {
        let path = temp_path("clear");
        let store = SessionStore::new(&path);

        store.save(sample_session()).unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(store.current().is_none());
        assert_eq!(SessionStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let store = SessionStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), None);
    }
}
