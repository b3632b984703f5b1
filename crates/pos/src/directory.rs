//! Fixed directory of known staff users.
//!
//! There is no user database; login matches against this in-memory
//! directory. The demo seed mirrors the two staff accounts the prototype
//! ships with.

use pharmapos_core::{Email, Presence, Role, RolePermissions, UserId, UserStatus};

use crate::models::User;

/// An in-memory directory of staff users, the lookup source for login.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Build a directory from an explicit user list.
    #[must_use]
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The demo staff directory: one owner and one salesperson.
    ///
    /// # Panics
    ///
    /// Never panics; the seeded emails are valid literals.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    pub fn demo(table: &RolePermissions) -> Self {
        Self::new(vec![
            User::new(
                UserId::new(1),
                "Dr. Sarah Johnson",
                Email::parse("sarah@pharmacy.com").unwrap(),
                Role::Owner,
                UserStatus::Active,
                Presence::Online,
                table,
            ),
            User::new(
                UserId::new(2),
                "Mike Chen",
                Email::parse("mike@pharmacy.com").unwrap(),
                Role::Salesperson,
                UserStatus::Active,
                Presence::Online,
                table,
            ),
        ])
    }

    /// Look up a user by email.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<&User> {
        self.users.iter().find(|u| &u.email == email)
    }

    /// Look up a user by ID.
    #[must_use]
    pub fn find_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// All known users, in directory order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }
}
