//! POS configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POS_DATA_DIR` - Directory holding the persisted session record
//!   (default: `./data`)
//! - `POS_STORE_NAME` - Store name printed on receipts (default: `PharmaPOS`)
//! - `POS_DEMO_MODE` - Enables the demo user switcher (default: `false`).
//!   The switcher bypasses credential checks entirely; it must never be
//!   enabled in a real deployment.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
///
/// Every POS variable has a default, so the only failure is a value that
/// is present but unparseable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// POS application configuration.
#[derive(Debug, Clone)]
pub struct PosConfig {
    /// Directory holding the persisted session record.
    pub data_dir: PathBuf,
    /// Store name shown in receipt headers.
    pub store_name: String,
    /// Whether the demo user switcher is reachable.
    pub demo_mode: bool,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store_name: "PharmaPOS".to_string(),
            demo_mode: false,
        }
    }
}

impl PosConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid
    /// (e.g. `POS_DEMO_MODE` is not a boolean).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let data_dir = get_optional_env("POS_DATA_DIR")
            .map_or(defaults.data_dir, PathBuf::from);
        let store_name = get_optional_env("POS_STORE_NAME").unwrap_or(defaults.store_name);
        let demo_mode = match get_optional_env("POS_DEMO_MODE") {
            Some(raw) => raw.parse::<bool>().map_err(|e| {
                ConfigError::InvalidEnvVar("POS_DEMO_MODE".to_string(), e.to_string())
            })?,
            None => defaults.demo_mode,
        };

        Ok(Self {
            data_dir,
            store_name,
            demo_mode,
        })
    }

    /// Path of the persisted session record.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
