//! PharmaPOS Core - Shared types library.
//!
//! This crate provides common types used across all PharmaPOS components:
//! - `pos` - Session store, access guard, cart engine, and read models
//! - `cli` - Command-line front end for the point-of-sale flows
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no clock
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, roles,
//!   and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
