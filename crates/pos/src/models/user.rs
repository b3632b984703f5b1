//! Staff user domain type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pharmapos_core::{Email, Permission, Presence, Role, RolePermissions, UserId, UserStatus};

/// A staff user (domain type).
///
/// The permission set is always derived from the role through a
/// [`RolePermissions`] table at construction; there is no way to hand a user
/// a free-form permission list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name (e.g. "Dr. Sarah Johnson").
    pub name: String,
    /// Email address, the login key.
    pub email: Email,
    /// Role determining the permission set.
    pub role: Role,
    /// Account status.
    pub status: UserStatus,
    /// Presence indicator.
    pub presence: Presence,
    /// Short initials for avatar display.
    pub initials: String,
    /// Permissions derived from the role.
    permissions: BTreeSet<Permission>,
}

impl User {
    /// Create a user, deriving permissions and initials.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: Email,
        role: Role,
        status: UserStatus,
        presence: Presence,
        table: &RolePermissions,
    ) -> Self {
        let name = name.into();
        let initials = derive_initials(&name);
        Self {
            id,
            name,
            email,
            role,
            status,
            presence,
            initials,
            permissions: table.permissions_for(role),
        }
    }

    /// Whether this user holds the given permission.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// The derived permission set.
    #[must_use]
    pub const fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }
}

/// First letter of the first and last alphabetic words of a name.
///
/// Honorifics like "Dr." are skipped so "Dr. Sarah Johnson" yields "SJ".
fn derive_initials(name: &str) -> String {
    let words: Vec<&str> = name
        .split_whitespace()
        .filter(|w| !w.ends_with('.'))
        .collect();
    let mut initials = String::new();
    if let Some(first) = words.first().and_then(|w| w.chars().next()) {
        initials.extend(first.to_uppercase());
    }
    if words.len() > 1
        && let Some(last) = words.last().and_then(|w| w.chars().next())
    {
        initials.extend(last.to_uppercase());
    }
    initials
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_user(role: Role) -> User {
        User::new(
            UserId::new(1),
            "Dr. Sarah Johnson",
            Email::parse("sarah@pharmacy.com").unwrap(),
            role,
            UserStatus::Active,
            Presence::Online,
            &RolePermissions::default(),
        )
    }

    #[test]
    fn test_permissions_match_role_table_for_all_tags() {
        let table = RolePermissions::default();
        for role in [Role::Owner, Role::Salesperson] {
            let user = make_user(role);
            for permission in Permission::ALL {
                assert_eq!(
                    user.has_permission(permission),
                    table.grants(role, permission),
                    "permission {permission} mismatch for role {role}"
                );
            }
        }
    }

    #[test]
    fn test_initials_skip_honorific() {
        let user = make_user(Role::Owner);
        assert_eq!(user.initials, "SJ");
    }

    #[test]
    fn test_initials_plain_name() {
        assert_eq!(derive_initials("Mike Chen"), "MC");
        assert_eq!(derive_initials("Cher"), "C");
    }
}
