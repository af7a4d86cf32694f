// SPDX-License-Identifier: MIT

//! File-backed session store.
//!
//! One JSON file holds the single session record; its presence is the only
//! signal that somebody is logged in on this machine. Storage failures are
//! never surfaced to callers: a session that cannot be read is treated as no
//! session, and a session that cannot be written is simply not persisted.

use crate::models::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted session record, exactly as the backend's login response
/// lays it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
    pub user: User,
}

/// Single point of truth for whether a session exists on this device.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the full session record, overwriting any prior one.
    ///
    /// Best-effort: failures are logged at debug level and swallowed.
    pub fn save(&self, session: &StoredSession) {
        match serde_json::to_string_pretty(session) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::debug!(path = %self.path.display(), error = %e, "Failed to write session file");
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to serialize session record");
            }
        }
    }

    /// Load the session record.
    ///
    /// A missing file, an unreadable file and malformed JSON all read as
    /// "no session"; none of them is an error.
    pub fn load(&self) -> Option<StoredSession> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %self.path.display(), error = %e, "Failed to read session file");
                }
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Discarding malformed session file");
                None
            }
        }
    }

    /// Remove the session record. Idempotent; removing an absent record is
    /// a no-op success.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %self.path.display(), error = %e, "Failed to remove session file");
            }
        }
    }

    /// The stored user, if a session exists.
    pub fn current_user(&self) -> Option<User> {
        self.load().map(|session| session.user)
    }

    /// True iff a record exists and carries a non-empty access token.
    pub fn has_token(&self) -> bool {
        self.load()
            .map(|session| !session.access_token.is_empty())
            .unwrap_or(false)
    }

    /// The stored access token, if a non-empty one exists.
    pub fn token(&self) -> Option<String> {
        self.load()
            .map(|session| session.access_token)
            .filter(|token| !token.is_empty())
    }

    /// Rewrite only the `user` field of the stored record, leaving the
    /// token and role untouched. A no-op when no record exists.
    pub fn update_user(&self, user: &User) {
        if let Some(mut session) = self.load() {
            session.user = user.clone();
            self.save(&session);
        }
    }
}
