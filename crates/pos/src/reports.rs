//! Dashboard summaries derived from the transaction log and catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use pharmapos_core::Money;

use crate::catalog::Catalog;
use crate::models::Product;
use crate::transactions::TransactionLog;

/// Aggregated sales figures for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub date: NaiveDate,
    /// Sum of recorded transaction totals.
    pub revenue: Money,
    /// Number of completed transactions.
    pub transaction_count: usize,
    /// Total units sold across all transactions.
    pub items_sold: u32,
    /// Revenue divided by transaction count, rounded to cents.
    /// Zero when there were no sales.
    pub average_sale: Money,
}

impl SalesSummary {
    /// Summarize all transactions recorded on `date` (UTC).
    ///
    /// # Panics
    ///
    /// Never panics: revenue is a sum of non-negative amounts and the
    /// divisor is checked.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    pub fn for_day(log: &TransactionLog, date: NaiveDate) -> Self {
        let day: Vec<_> = log
            .transactions()
            .iter()
            .filter(|t| t.timestamp.date_naive() == date)
            .collect();

        let revenue: Money = day.iter().map(|t| t.total).sum();
        let items_sold = day
            .iter()
            .flat_map(|t| &t.items)
            .map(|i| i.quantity)
            .sum();
        let average_sale = if day.is_empty() {
            Money::ZERO
        } else {
            Money::new(revenue.amount() / Decimal::from(day.len()))
                .unwrap()
                .rounded()
        };

        Self {
            date,
            revenue,
            transaction_count: day.len(),
            items_sold,
            average_sale,
        }
    }
}

/// Products needing a reorder: low or out of stock, catalog order.
#[must_use]
pub fn low_stock_alerts(catalog: &Catalog) -> Vec<&Product> {
    catalog.low_stock()
}
