//! Core types for PharmaPOS.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError, TAX_RATE};
pub use role::{Permission, Role, RolePermissions};
pub use status::*;
