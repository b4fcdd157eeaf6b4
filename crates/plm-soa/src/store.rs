//! Session store persisted as a JSON file
//!
//! Lets a session outlive the process, so separate invocations can share
//! one login. An expired or unreadable file reads as "no session".

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::{Path, PathBuf};

use chrono::Utc;
use plm_soa_core::{Session, SessionStore};

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn read(&self) -> anyhow::Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&content)?))
    }
}

impl SessionStore for FileSessionStore {
    fn store(&self, session: &Session) {
        match self.write(session) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Session saved"),
            Err(e) => tracing::warn!(path = %self.path.display(), "Failed to save session: {e}"),
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Session file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), "Failed to remove session file: {e}"),
        }
    }

    fn current(&self) -> Option<Session> {
        match self.read() {
            Ok(session) => session.filter(|session| session.is_valid_at(Utc::now())),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable session file: {e}");
                None
            }
        }
    }
}
