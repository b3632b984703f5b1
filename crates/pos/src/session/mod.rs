//! Session store: the single source of truth for who is acting and what
//! they may do.
//!
//! State machine:
//!
//! ```text
//! Unauthenticated --login success--> Authenticated(user)
//! Authenticated(user) --logout--> Unauthenticated
//! Authenticated(user) --switch_user (demo mode only)--> Authenticated(other)
//! ```
//!
//! The store is constructor-injected everywhere it is consumed; there is no
//! ambient global session, so tests can run isolated instances.

mod storage;

pub use storage::{
    FileSessionStorage, MemorySessionStorage, RECORD_VERSION, SessionRecord, SessionStorage,
};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, warn};

use pharmapos_core::{Email, Permission, UserId};

use crate::directory::UserDirectory;
use crate::models::User;

/// Errors that can occur during session operations.
///
/// A failed login is not an error; it is a `false` result. Errors here are
/// infrastructure problems or misuse of the demo escape hatch.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The persisted record could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),

    /// `switch_user` was called without demo mode enabled.
    ///
    /// The switcher bypasses credential checks; outside of demo
    /// configurations it must not be reachable.
    #[error("user switching is only available in demo mode")]
    DemoModeDisabled,

    /// `switch_user` named a user not in the directory.
    #[error("unknown user id: {0}")]
    UnknownUser(UserId),
}

/// Owns the current authenticated identity and its permission set.
pub struct SessionStore<S: SessionStorage> {
    directory: UserDirectory,
    storage: S,
    demo_mode: bool,
    current: Option<User>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store with no active session.
    ///
    /// `demo_mode` gates [`Self::switch_user`]; it comes from
    /// [`PosConfig::demo_mode`](crate::config::PosConfig::demo_mode) and
    /// must stay off outside demos.
    pub const fn new(directory: UserDirectory, storage: S, demo_mode: bool) -> Self {
        Self {
            directory,
            storage,
            demo_mode,
            current: None,
        }
    }

    /// Restore a previously persisted session, if one exists.
    ///
    /// Called once at startup. A missing, corrupt, or stale record leaves
    /// the store unauthenticated.
    ///
    /// The record only identifies the user; the session is rebuilt from the
    /// directory entry, so a tampered or stale permission list on disk can
    /// never widen what the role grants. A record naming a user no longer
    /// in the directory is discarded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` only when the backend itself fails;
    /// an invalid record is silently discarded.
    pub fn restore(&mut self) -> Result<(), SessionError> {
        if let Some(record) = self.storage.load()? {
            match self.directory.find_by_id(record.user.id).cloned() {
                Some(user) => {
                    info!(user = %user.email, "restored persisted session");
                    self.current = Some(user);
                }
                None => {
                    warn!(
                        user = %record.user.email,
                        "discarding session record for unknown user"
                    );
                    self.storage.clear()?;
                }
            }
        }
        Ok(())
    }

    /// Attempt to sign in.
    ///
    /// Matches `email` against the user directory. Any non-empty password
    /// is accepted for a known email: this is the prototype's mock check,
    /// kept as a placeholder, and real credential verification must replace
    /// it before this store guards anything of value.
    ///
    /// Returns `Ok(true)` and persists the session on a match; `Ok(false)`
    /// (leaving the session unauthenticated) otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if persisting the record fails.
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<bool, SessionError> {
        if password.expose_secret().is_empty() {
            warn!("login rejected: empty password");
            return Ok(false);
        }

        let Ok(email) = Email::parse(email) else {
            warn!("login rejected: malformed email");
            return Ok(false);
        };

        let Some(user) = self.directory.find_by_email(&email).cloned() else {
            warn!(email = %email, "login rejected: unknown email");
            return Ok(false);
        };

        self.storage.save(&SessionRecord::new(user.clone()))?;
        info!(user = %user.email, role = %user.role, "login succeeded");
        self.current = Some(user);
        Ok(true)
    }

    /// Sign out, clearing the in-memory session and the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the persisted record cannot be
    /// removed; the in-memory session is cleared regardless.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.current.take() {
            info!(user = %user.email, "logged out");
        }
        self.storage.clear()
    }

    /// The active user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the active user holds `permission`.
    ///
    /// `false` (not an error) when no user is signed in.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.current
            .as_ref()
            .is_some_and(|u| u.has_permission(permission))
    }

    /// Replace the session with another known user, skipping credentials.
    ///
    /// Demo affordance only; refused unless the store was built with demo
    /// mode enabled.
    ///
    /// # Errors
    ///
    /// - `SessionError::DemoModeDisabled` outside demo mode
    /// - `SessionError::UnknownUser` if `user_id` is not in the directory
    /// - `SessionError::Storage` if persisting the record fails
    pub fn switch_user(&mut self, user_id: UserId) -> Result<(), SessionError> {
        if !self.demo_mode {
            return Err(SessionError::DemoModeDisabled);
        }

        let user = self
            .directory
            .find_by_id(user_id)
            .cloned()
            .ok_or(SessionError::UnknownUser(user_id))?;

        self.storage.save(&SessionRecord::new(user.clone()))?;
        warn!(user = %user.email, "demo user switch (credential checks bypassed)");
        self.current = Some(user);
        Ok(())
    }

    /// The user directory this store authenticates against.
    #[must_use]
    pub const fn directory(&self) -> &UserDirectory {
        &self.directory
    }
}
