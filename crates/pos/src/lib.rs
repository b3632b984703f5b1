//! PharmaPOS engine - session, authorization, and sales logic.
//!
//! This crate holds everything behind the pharmacy point-of-sale front end
//! that actually has invariants:
//!
//! - [`session`] - the session store: who is acting and what may they do
//! - [`guard`] - the access guard: permission/role gating as a pure decision
//! - [`cart`] - the cart engine: line items, totals, and checkout
//! - [`transactions`] - the transaction log read model
//!
//! Supporting modules carry the demo data sets and the output side channels:
//! [`catalog`] (products), [`directory`] (known users), [`export`] (CSV),
//! [`receipt`] (printable HTML), and [`reports`] (derived summaries).
//!
//! There is no server and no database. The only durable state is the single
//! persisted session record, written through [`session::SessionStorage`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod export;
pub mod guard;
pub mod models;
pub mod receipt;
pub mod reports;
pub mod session;
pub mod transactions;

pub use cart::{
    Cart, CartLine, CheckoutError, SubmitError, Totals, TransactionDraft, TransactionSubmitter,
};
pub use catalog::Catalog;
pub use config::{ConfigError, PosConfig};
pub use directory::UserDirectory;
pub use guard::{AccessDecision, AccessRequirement, DenialReason};
pub use models::{CustomerInfo, Product, Transaction, TransactionItem, User};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionError, SessionStore};
pub use transactions::{DatePeriod, RefundConfirmation, TransactionFilter, TransactionLog};
