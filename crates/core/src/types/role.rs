//! Roles, permissions, and the role-to-permission table.
//!
//! Authorization in PharmaPOS is role-based: a user's permission set is
//! fully determined by their role through a [`RolePermissions`] table. The
//! table is configuration data (serde-loadable), not hard-coded logic, so a
//! deployment can adjust it without touching the access-control code.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Staff role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every area including the admin panel.
    Owner,
    /// Sales-floor access: sales and inventory only.
    Salesperson,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Salesperson => write!(f, "salesperson"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "salesperson" => Ok(Self::Salesperson),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// A permission tag gating one area of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Dashboard,
    Inventory,
    Sales,
    Reports,
    Admin,
}

impl Permission {
    /// All permission tags, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Inventory,
        Self::Sales,
        Self::Reports,
        Self::Admin,
    ];
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "dashboard"),
            Self::Inventory => write!(f, "inventory"),
            Self::Sales => write!(f, "sales"),
            Self::Reports => write!(f, "reports"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "inventory" => Ok(Self::Inventory),
            "sales" => Ok(Self::Sales),
            "reports" => Ok(Self::Reports),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid permission: {s}")),
        }
    }
}

/// The role-to-permission table.
///
/// The default table grants the owner every permission and the salesperson
/// sales and inventory only, so the owner's set is always a superset of the
/// salesperson's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissions(BTreeMap<Role, BTreeSet<Permission>>);

impl Default for RolePermissions {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        table.insert(Role::Owner, Permission::ALL.into_iter().collect());
        table.insert(
            Role::Salesperson,
            [Permission::Sales, Permission::Inventory]
                .into_iter()
                .collect(),
        );
        Self(table)
    }
}

impl RolePermissions {
    /// The permission set for a role. Empty for roles absent from the table.
    #[must_use]
    pub fn permissions_for(&self, role: Role) -> BTreeSet<Permission> {
        self.0.get(&role).cloned().unwrap_or_default()
    }

    /// Whether the role is granted the permission.
    #[must_use]
    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.0
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }
}
