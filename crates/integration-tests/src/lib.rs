//! Integration tests for PharmaPOS.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pharmapos-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_rbac` - login, persistence, and access guard scenarios
//! - `checkout_flow` - end-to-end sale: cart, checkout, history, outputs
//!
//! This crate also exports the shared fixtures the scenario tests build on.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;

use pharmapos::{MemorySessionStorage, SessionStore, UserDirectory};
use pharmapos_core::RolePermissions;

/// A fresh in-memory session store over the demo directory.
#[must_use]
pub fn demo_session(demo_mode: bool) -> SessionStore<MemorySessionStorage> {
    SessionStore::new(
        UserDirectory::demo(&RolePermissions::default()),
        MemorySessionStorage::new(),
        demo_mode,
    )
}

/// A session already signed in as the given demo user.
///
/// # Panics
///
/// Panics if the email is not in the demo directory; test fixtures only
/// pass seeded emails.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn signed_in(email: &str) -> SessionStore<MemorySessionStorage> {
    let mut session = demo_session(false);
    let ok = session
        .login(email, &password("integration"))
        .expect("in-memory storage cannot fail");
    assert!(ok, "demo login must succeed for {email}");
    session
}

/// Wrap a test password.
#[must_use]
pub fn password(raw: &str) -> SecretString {
    SecretString::from(raw.to_string())
}
