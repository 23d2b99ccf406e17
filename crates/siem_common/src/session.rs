//! Session state for the console.
//!
//! Holds the bearer token and operator profile for the logged-in session
//! and persists them to a state file so a login survives across
//! invocations. The store is the single owner of session state: the API
//! client and the route guard read it through an `Arc`, and only
//! login/logout mutate it.

use crate::models::Session;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, warn};

pub struct SessionStore {
    path: PathBuf,
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Discover the session state file with a fallback chain
    ///
    /// Priority:
    /// 1. $SIEMCTL_SESSION_FILE environment variable (explicit override)
    /// 2. $XDG_STATE_HOME/siemplus/session.json (XDG standard)
    /// 3. ~/.local/state/siemplus/session.json (XDG fallback)
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("SIEMCTL_SESSION_FILE") {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
            if !xdg_state.is_empty() {
                return PathBuf::from(xdg_state).join("siemplus").join("session.json");
            }
        }

        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("siemplus")
            .join("session.json")
    }

    /// Open the store, rehydrating any persisted session.
    ///
    /// A missing, unreadable or corrupt state file yields an empty store;
    /// startup never fails on session state.
    pub fn open(path: PathBuf) -> Self {
        let session = Self::read_state(&path);
        Self {
            path,
            inner: RwLock::new(session),
        }
    }

    fn read_state(path: &Path) -> Option<Session> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) if !session.token.is_empty() => {
                debug!("Rehydrated session from {:?}", path);
                Some(session)
            }
            Ok(_) => {
                warn!("Ignoring persisted session with empty token at {:?}", path);
                None
            }
            Err(e) => {
                warn!("Ignoring corrupt session state at {:?}: {}", path, e);
                None
            }
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().expect("session state lock poisoned")
    }

    /// True iff a non-empty token is held. The route guard's single
    /// source of truth.
    pub fn is_authenticated(&self) -> bool {
        self.read_guard()
            .as_ref()
            .map(|s| !s.token.is_empty())
            .unwrap_or(false)
    }

    /// Current bearer token, read at call time.
    pub fn token(&self) -> Option<String> {
        self.read_guard()
            .as_ref()
            .map(|s| s.token.clone())
            .filter(|t| !t.is_empty())
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.read_guard().clone()
    }

    /// Store a session and persist it to the state file.
    ///
    /// A persistence failure is logged but does not fail the login; the
    /// session still holds for this process.
    pub fn establish(&self, session: Session) {
        if let Err(e) = self.persist(&session) {
            warn!(
                "Session not persisted to {:?} ({}); it will not survive this invocation",
                self.path, e
            );
        }
        *self.inner.write().expect("session state lock poisoned") = Some(session);
    }

    /// Clear token and user and remove the state file. Always succeeds,
    /// regardless of prior state.
    pub fn clear(&self) {
        *self.inner.write().expect("session state lock poisoned") = None;
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed session state at {:?}", self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove session state at {:?}: {}", self.path, e),
        }
    }

    fn persist(&self, session: &Session) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;

        // The state file carries a bearer credential; keep it private.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}
