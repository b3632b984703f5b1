//! Persistence backends for the session record.
//!
//! Exactly one session record is ever persisted. The record is versioned so
//! a future schema change can invalidate stale records instead of
//! misreading them; an unknown version degrades to "signed out" on load
//! rather than failing startup.

use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::User;

use super::SessionError;

/// Current schema version of the persisted record.
pub const RECORD_VERSION: u32 = 1;

/// The single persisted session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Schema version; records with an unknown version are discarded.
    pub version: u32,
    /// The authenticated user at the time of the last write.
    pub user: User,
    /// When the record was written.
    pub saved_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Wrap a user in a current-version record stamped now.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            version: RECORD_VERSION,
            user,
            saved_at: Utc::now(),
        }
    }
}

/// Storage backend for the session record.
///
/// Only the session store writes through this trait, and only from its
/// login/logout/switch operations.
pub trait SessionStorage {
    /// Load the persisted record, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the backend cannot be read.
    /// A missing or unreadable record is `Ok(None)`, not an error.
    fn load(&self) -> Result<Option<SessionRecord>, SessionError>;

    /// Overwrite the persisted record wholesale.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the record cannot be written.
    fn save(&mut self, record: &SessionRecord) -> Result<(), SessionError>;

    /// Delete the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the record cannot be removed.
    fn clear(&mut self) -> Result<(), SessionError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for &mut S {
    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        (**self).load()
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), SessionError> {
        (**self).save(record)
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        (**self).clear()
    }
}

/// File-backed storage: one JSON document at a fixed path.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Storage rooted at the given file path (typically
    /// [`PosConfig::session_file`](crate::config::PosConfig::session_file)).
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) if record.version == RECORD_VERSION => Ok(Some(record)),
            Ok(record) => {
                warn!(
                    version = record.version,
                    "discarding session record with unknown version"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "discarding unparseable session record");
                Ok(None)
            }
        }
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Storage(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(record)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| SessionError::Storage(e.to_string()))
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    record: Option<SessionRecord>,
}

impl MemorySessionStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self { record: None }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), SessionError> {
        self.record = Some(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.record = None;
        Ok(())
    }
}
