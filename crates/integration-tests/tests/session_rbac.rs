//! Integration tests for session lifecycle and role-based access.
//!
//! These tests run the same scenarios an operator walks through at the
//! terminal: sign in, restart, hit protected screens, switch demo users.

use pharmapos::guard::{self, AccessDecision, AccessRequirement, DenialReason};
use pharmapos::{FileSessionStorage, SessionError, SessionStore, UserDirectory};
use pharmapos_core::{Permission, Role, RolePermissions, UserId};

use pharmapos_integration_tests::{demo_session, password, signed_in};

// =============================================================================
// Session Persistence Tests
// =============================================================================

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");
    let directory = UserDirectory::demo(&RolePermissions::default());

    // First "run": sign in
    {
        let mut session = SessionStore::new(
            directory.clone(),
            FileSessionStorage::new(session_file.clone()),
            false,
        );
        let ok = session
            .login("sarah@pharmacy.com", &password("secret"))
            .expect("storage writable");
        assert!(ok);
    }

    // Second "run": restore from disk
    let mut session = SessionStore::new(directory, FileSessionStorage::new(session_file), false);
    session.restore().expect("storage readable");
    assert!(session.is_authenticated());
    assert_eq!(
        session.current_user().expect("signed in").email.as_str(),
        "sarah@pharmacy.com"
    );
}

#[test]
fn test_logout_removes_record_across_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");
    let directory = UserDirectory::demo(&RolePermissions::default());

    {
        let mut session = SessionStore::new(
            directory.clone(),
            FileSessionStorage::new(session_file.clone()),
            false,
        );
        session
            .login("mike@pharmacy.com", &password("secret"))
            .expect("storage writable");
        session.logout().expect("storage writable");
    }

    let mut session = SessionStore::new(directory, FileSessionStorage::new(session_file), false);
    session.restore().expect("storage readable");
    assert!(!session.is_authenticated());
}

#[test]
fn test_edited_record_cannot_widen_permissions() {
    // A session file granting a salesperson "admin" by hand must not get
    // past the guard after restore.
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");
    std::fs::write(
        &session_file,
        r#"{
            "version": 1,
            "user": {
                "id": 2,
                "name": "Mike Chen",
                "email": "mike@pharmacy.com",
                "role": "salesperson",
                "status": "active",
                "presence": "online",
                "initials": "MC",
                "permissions": ["sales", "inventory", "admin"]
            },
            "saved_at": "2024-01-15T14:30:00Z"
        }"#,
    )
    .expect("write");

    let mut session = SessionStore::new(
        UserDirectory::demo(&RolePermissions::default()),
        FileSessionStorage::new(session_file),
        false,
    );
    session.restore().expect("storage readable");

    assert!(session.is_authenticated());
    assert!(!session.has_permission(Permission::Admin));
    assert_eq!(
        guard::evaluate(&session, AccessRequirement::permission(Permission::Admin)),
        AccessDecision::RedirectToDashboard(DenialReason::MissingPermission(Permission::Admin))
    );
}

#[test]
fn test_corrupt_record_degrades_to_signed_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");
    std::fs::write(&session_file, "{ definitely not a session").expect("write");

    let mut session = SessionStore::new(
        UserDirectory::demo(&RolePermissions::default()),
        FileSessionStorage::new(session_file),
        false,
    );
    session.restore().expect("corrupt record is not an error");
    assert!(!session.is_authenticated());
}

// =============================================================================
// Access Guard Tests
// =============================================================================

#[test]
fn test_owner_reaches_every_screen() {
    let session = signed_in("sarah@pharmacy.com");
    for permission in Permission::ALL {
        let decision = guard::evaluate(&session, AccessRequirement::permission(permission));
        assert_eq!(decision, AccessDecision::Grant, "owner denied {permission:?}");
    }
}

#[test]
fn test_salesperson_screen_matrix() {
    let session = signed_in("mike@pharmacy.com");

    let granted = [Permission::Sales, Permission::Inventory];
    for permission in Permission::ALL {
        let decision = guard::evaluate(&session, AccessRequirement::permission(permission));
        if granted.contains(&permission) {
            assert_eq!(decision, AccessDecision::Grant);
        } else {
            assert_eq!(
                decision,
                AccessDecision::RedirectToDashboard(DenialReason::MissingPermission(permission))
            );
        }
    }
}

#[test]
fn test_signed_out_always_redirects_to_login() {
    let session = demo_session(false);
    for permission in Permission::ALL {
        assert_eq!(
            guard::evaluate(&session, AccessRequirement::permission(permission)),
            AccessDecision::RedirectToLogin
        );
    }
}

#[test]
fn test_owner_only_screen_rejects_salesperson() {
    let session = signed_in("mike@pharmacy.com");
    let decision = guard::evaluate(&session, AccessRequirement::role(Role::Owner));
    assert_eq!(
        decision,
        AccessDecision::RedirectToDashboard(DenialReason::WrongRole {
            required: Role::Owner,
            actual: Role::Salesperson,
        })
    );
}

// =============================================================================
// Demo User Switching Tests
// =============================================================================

#[test]
fn test_switch_user_changes_effective_permissions() {
    let mut session = demo_session(true);
    session
        .login("sarah@pharmacy.com", &password("secret"))
        .expect("login");
    assert!(session.has_permission(Permission::Admin));

    session.switch_user(UserId::new(2)).expect("demo switch");
    assert!(!session.has_permission(Permission::Admin));
    assert!(session.has_permission(Permission::Sales));
}

#[test]
fn test_switch_user_refused_outside_demo_mode() {
    let mut session = signed_in("sarah@pharmacy.com");
    let err = session.switch_user(UserId::new(2)).expect_err("must refuse");
    assert!(matches!(err, SessionError::DemoModeDisabled));
    assert!(session.has_permission(Permission::Admin));
}
