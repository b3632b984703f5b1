//! Access guard: permission/role gating as a pure decision.
//!
//! The guard never renders or navigates itself; it maps session state plus
//! a requirement to an [`AccessDecision`] and the caller acts on it. The
//! decision is computed before any protected content is touched, so denied
//! content is never exposed, and repeated evaluation of the same state
//! yields the same decision.

use pharmapos_core::{Permission, Role};

use crate::models::User;
use crate::session::{SessionStorage, SessionStore};

/// What a protected view requires. Both checks are optional; an empty
/// requirement only demands authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessRequirement {
    pub permission: Option<Permission>,
    pub role: Option<Role>,
}

impl AccessRequirement {
    /// Require a permission tag.
    #[must_use]
    pub const fn permission(permission: Permission) -> Self {
        Self {
            permission: Some(permission),
            role: None,
        }
    }

    /// Require an exact role.
    #[must_use]
    pub const fn role(role: Role) -> Self {
        Self {
            permission: None,
            role: Some(role),
        }
    }

    /// Additionally require an exact role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Why access was denied for an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The user's role does not grant the required permission.
    MissingPermission(Permission),
    /// The user's role is not the required one.
    WrongRole { required: Role, actual: Role },
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPermission(p) => {
                write!(f, "missing required permission: {p}")
            }
            Self::WrongRole { required, actual } => {
                write!(f, "requires {required} privileges (current role: {actual})")
            }
        }
    }
}

/// Outcome of evaluating an [`AccessRequirement`] against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the protected content.
    Grant,
    /// No authenticated user: send to the public entry point.
    RedirectToLogin,
    /// Authenticated but not allowed: send to the safe default view.
    RedirectToDashboard(DenialReason),
}

impl AccessDecision {
    /// Whether the protected content may be shown.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Grant)
    }
}

/// Evaluate a requirement against the current session state.
///
/// Checks run in a fixed order: authentication, then permission, then role.
#[must_use]
pub fn evaluate<S: SessionStorage>(
    session: &SessionStore<S>,
    requirement: AccessRequirement,
) -> AccessDecision {
    session.current_user().map_or(
        AccessDecision::RedirectToLogin,
        |user| evaluate_for_user(user, requirement),
    )
}

fn evaluate_for_user(user: &User, requirement: AccessRequirement) -> AccessDecision {
    if let Some(permission) = requirement.permission
        && !user.has_permission(permission)
    {
        return AccessDecision::RedirectToDashboard(DenialReason::MissingPermission(permission));
    }

    if let Some(required) = requirement.role
        && user.role != required
    {
        return AccessDecision::RedirectToDashboard(DenialReason::WrongRole {
            required,
            actual: user.role,
        });
    }

    AccessDecision::Grant
}
