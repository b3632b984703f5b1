//! Transaction submission boundary.
//!
//! Checkout hands a finished draft to whatever backend records sales. The
//! prototype records into the in-memory [`TransactionLog`]; a real payment
//! or ERP backend plugs in through the same trait.
//!
//! [`TransactionLog`]: crate::transactions::TransactionLog

use thiserror::Error;

use pharmapos_core::{Money, PaymentMethod};

use crate::models::{CustomerInfo, Transaction, TransactionItem};

/// Why a draft could not be recorded.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The backend refused the draft.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("submission backend unavailable: {0}")]
    Unavailable(String),
}

/// Everything checkout knows about a sale, minus the identity the backend
/// assigns. Monetary fields are already rounded to cents.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub customer: CustomerInfo,
    pub items: Vec<TransactionItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

/// Records a checkout draft as a finalized transaction.
///
/// Implementations assign the transaction id and timestamp. A failed
/// submission must leave the backend unchanged so the caller can retry the
/// same draft.
pub trait TransactionSubmitter {
    /// Record the draft, returning the finalized transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] when the draft cannot be recorded; the
    /// caller keeps the cart intact in that case.
    fn submit(&mut self, draft: TransactionDraft) -> Result<Transaction, SubmitError>;
}
