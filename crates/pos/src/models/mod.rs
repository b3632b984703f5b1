//! Domain types for the POS engine.
//!
//! These types represent validated domain objects; mock/demo data enters the
//! system only through the constructors here.

pub mod product;
pub mod transaction;
pub mod user;

pub use product::Product;
pub use transaction::{CustomerInfo, Transaction, TransactionItem};
pub use user::User;
