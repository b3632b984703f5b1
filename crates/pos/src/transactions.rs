//! Transaction log: the read model for completed sales.
//!
//! Records are immutable once stored; the only mutation is appending a new
//! sale at checkout, which this log accepts through the
//! [`TransactionSubmitter`] trait. History queries and refund lookups never
//! change stored records.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::debug;

use pharmapos_core::{Money, PaymentMethod, TransactionId, TransactionStatus};

use crate::cart::{SubmitError, TransactionDraft, TransactionSubmitter};
use crate::models::{CustomerInfo, Transaction, TransactionItem};

/// Relative date window for history queries, anchored to a supplied "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePeriod {
    /// Same calendar date as the anchor.
    Today,
    /// Within the seven days up to and including the anchor.
    Week,
    /// Same calendar month as the anchor.
    Month,
    /// Same calendar year as the anchor.
    Year,
}

impl DatePeriod {
    fn contains(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Today => timestamp.date_naive() == now.date_naive(),
            Self::Week => timestamp <= now && now - timestamp < Duration::days(7),
            Self::Month => {
                timestamp.year() == now.year() && timestamp.month() == now.month()
            }
            Self::Year => timestamp.year() == now.year(),
        }
    }
}

/// History query: free-text search plus an optional date window.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring matched against the transaction id and
    /// the customer name.
    pub search: Option<String>,
    pub period: Option<DatePeriod>,
}

/// Non-mutating refund summary shown for confirmation.
///
/// Refunds stop at confirmation; no stored record is modified and no
/// counter-transaction is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundConfirmation {
    pub transaction_id: TransactionId,
    pub customer: String,
    pub total: Money,
}

/// Append-only store of finalized sales, newest first.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
    next_seq: u32,
}

impl TransactionLog {
    /// A log with no history.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            next_seq: 1,
        }
    }

    /// The demo log: five completed sales from 2024-01-15.
    ///
    /// # Panics
    ///
    /// Never panics; the seeded literals are valid.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used, clippy::too_many_lines)]
    pub fn demo() -> Self {
        fn item(name: &str, quantity: u32, cents: i64) -> TransactionItem {
            TransactionItem {
                name: name.to_string(),
                quantity,
                unit_price: Money::from_cents(cents).unwrap(),
            }
        }

        fn seeded(
            seq: u32,
            time: (u32, u32),
            customer: &str,
            items: Vec<TransactionItem>,
            amounts: (i64, i64, i64),
            payment_method: PaymentMethod,
        ) -> Transaction {
            let timestamp = NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(time.0, time.1, 0)
                .unwrap()
                .and_utc();
            Transaction {
                id: TransactionId::sequential(2024, seq),
                timestamp,
                customer: CustomerInfo::named(customer),
                items,
                subtotal: Money::from_cents(amounts.0).unwrap(),
                tax: Money::from_cents(amounts.1).unwrap(),
                total: Money::from_cents(amounts.2).unwrap(),
                payment_method,
                status: TransactionStatus::Completed,
            }
        }

        let transactions = vec![
            seeded(
                5,
                (13, 55),
                "Robert Brown",
                vec![
                    item("Blood Pressure Monitor", 1, 12000),
                    item("Aspirin 500mg", 1, 1599),
                ],
                (13599, 1088, 14687),
                PaymentMethod::Card,
            ),
            seeded(
                4,
                (14, 8),
                "Sarah Wilson",
                vec![
                    item("Vitamin D3", 1, 1899),
                    item("Omega-3 Fish Oil", 1, 2250),
                ],
                (4149, 332, 4481),
                PaymentMethod::Cash,
            ),
            seeded(
                3,
                (14, 15),
                "David Johnson",
                vec![
                    item("Paracetamol 500mg", 3, 899),
                    item("Cough Syrup", 1, 1250),
                    item("Thermometer Digital", 1, 1500),
                ],
                (5447, 436, 5883),
                PaymentMethod::Card,
            ),
            seeded(
                2,
                (14, 22),
                "Maria Garcia",
                vec![
                    item("Insulin Pen", 1, 8000),
                    item("Blood Glucose Strips", 1, 4500),
                ],
                (12500, 1000, 13500),
                PaymentMethod::Insurance,
            ),
            seeded(
                1,
                (14, 30),
                "John Smith",
                vec![
                    item("Aspirin 500mg", 2, 1599),
                    item("Vitamin C 1000mg", 1, 1250),
                ],
                (4448, 356, 4804),
                PaymentMethod::Cash,
            ),
        ];

        let mut log = Self {
            transactions,
            next_seq: 6,
        };
        // Newest first, by timestamp
        log.transactions
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        log
    }

    /// All stored transactions, newest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Look up a transaction by id.
    #[must_use]
    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Query the history, newest first.
    ///
    /// `now` anchors the date window so queries are reproducible; callers
    /// pass `Utc::now()` outside of tests.
    #[must_use]
    pub fn query(&self, filter: &TransactionFilter, now: DateTime<Utc>) -> Vec<&Transaction> {
        let needle = filter
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());

        self.transactions
            .iter()
            .filter(|t| {
                needle.as_deref().is_none_or(|needle| {
                    t.id.as_str().to_lowercase().contains(needle)
                        || t.customer.display_name().to_lowercase().contains(needle)
                })
            })
            .filter(|t| {
                filter
                    .period
                    .is_none_or(|period| period.contains(t.timestamp, now))
            })
            .collect()
    }

    /// Build the refund confirmation for a stored transaction.
    ///
    /// Read-only: the stored record keeps its status regardless of whether
    /// the operator confirms.
    #[must_use]
    pub fn refund_confirmation(&self, id: &TransactionId) -> Option<RefundConfirmation> {
        self.find(id).map(|t| RefundConfirmation {
            transaction_id: t.id.clone(),
            customer: t.customer.display_name().to_string(),
            total: t.total,
        })
    }

    fn record(&mut self, draft: TransactionDraft, now: DateTime<Utc>) -> Transaction {
        let transaction = Transaction {
            id: TransactionId::sequential(now.year(), self.next_seq),
            timestamp: now,
            customer: draft.customer,
            items: draft.items,
            subtotal: draft.subtotal,
            tax: draft.tax,
            total: draft.total,
            payment_method: draft.payment_method,
            status: TransactionStatus::Completed,
        };
        self.next_seq += 1;
        debug!(id = %transaction.id, "transaction recorded");
        self.transactions.insert(0, transaction.clone());
        transaction
    }
}

impl TransactionSubmitter for TransactionLog {
    fn submit(&mut self, draft: TransactionDraft) -> Result<Transaction, SubmitError> {
        Ok(self.record(draft, Utc::now()))
    }
}
