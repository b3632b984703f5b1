//! Command implementations for the PharmaPOS CLI.

pub mod history;
pub mod inventory;
pub mod report;
pub mod sale;
pub mod session;

use pharmapos::guard::{self, AccessDecision, AccessRequirement};
use pharmapos::{
    ConfigError, DenialReason, FileSessionStorage, PosConfig, SessionError, SessionStore,
    UserDirectory,
};
use pharmapos_core::RolePermissions;
use thiserror::Error;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Session store failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The command needs an authenticated session.
    #[error("not signed in; run `pos-cli login` first")]
    NotSignedIn,

    /// The signed-in user may not run this command.
    #[error("access denied: {0}")]
    AccessDenied(DenialReason),

    /// Output file could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration and restore the persisted session, if any.
pub(crate) fn open_session(
    config: &PosConfig,
) -> Result<SessionStore<FileSessionStorage>, CommandError> {
    let directory = UserDirectory::demo(&RolePermissions::default());
    let storage = FileSessionStorage::new(config.session_file());
    let mut session = SessionStore::new(directory, storage, config.demo_mode);
    session.restore()?;
    Ok(session)
}

/// Gate a command on the session satisfying a requirement.
pub(crate) fn require(
    session: &SessionStore<FileSessionStorage>,
    requirement: AccessRequirement,
) -> Result<(), CommandError> {
    match guard::evaluate(session, requirement) {
        AccessDecision::Grant => Ok(()),
        AccessDecision::RedirectToLogin => Err(CommandError::NotSignedIn),
        AccessDecision::RedirectToDashboard(reason) => Err(CommandError::AccessDenied(reason)),
    }
}
