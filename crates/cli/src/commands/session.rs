//! Session commands: login, logout, whoami, switch-user.
//!
//! The session record lives at the path given by `POS_DATA_DIR`
//! (`./data/session.json` by default) and carries across invocations, so a
//! login in one run gates commands in the next.

use secrecy::SecretString;
use thiserror::Error;

use pharmapos::PosConfig;
use pharmapos_core::UserId;

use super::{CommandError, open_session};

/// Errors specific to session commands.
#[derive(Debug, Error)]
pub enum SessionCommandError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Credentials did not match a known user.
    #[error("login failed for {0}")]
    LoginFailed(String),
}

/// Sign in and persist the session.
pub fn login(email: &str, password: SecretString) -> Result<(), SessionCommandError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let mut session = open_session(&config)?;

    if session
        .login(email, &password)
        .map_err(CommandError::from)?
    {
        // login() already logs the success with the resolved role
        Ok(())
    } else {
        Err(SessionCommandError::LoginFailed(email.to_owned()))
    }
}

/// Sign out and remove the persisted record.
pub fn logout() -> Result<(), SessionCommandError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let mut session = open_session(&config)?;
    session.logout().map_err(CommandError::from)?;
    tracing::info!("signed out");
    Ok(())
}

/// Report the active session, if any.
pub fn whoami() -> Result<(), SessionCommandError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let session = open_session(&config)?;

    match session.current_user() {
        Some(user) => {
            tracing::info!(
                name = %user.name,
                email = %user.email,
                role = %user.role,
                "signed in"
            );
        }
        None => tracing::info!("not signed in"),
    }
    Ok(())
}

/// Switch to another demo user without credentials.
///
/// Only available when `POS_DEMO_MODE=true`.
pub fn switch_user(id: i32) -> Result<(), SessionCommandError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let mut session = open_session(&config)?;
    session
        .switch_user(UserId::new(id))
        .map_err(CommandError::from)?;
    Ok(())
}
