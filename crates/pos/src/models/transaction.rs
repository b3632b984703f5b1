//! Finalized transaction domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pharmapos_core::{Money, PaymentMethod, TransactionId, TransactionStatus};

/// Optional customer contact details captured at checkout.
///
/// All fields are optional; a sale with no details is a walk-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CustomerInfo {
    /// Customer with a name only (the common case in the seeded history).
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Display name for receipts and history rows.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Walk-in")
    }

    /// True when no field is filled in.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// One sold line on a finalized transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl TransactionItem {
    /// Extended price for the line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// A finalized sale.
///
/// Immutable once created. Monetary fields are recorded rounded to cents;
/// the exact intermediate values live only in the cart's
/// [`Totals`](crate::cart::Totals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub customer: CustomerInfo,
    pub items: Vec<TransactionItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = TransactionItem {
            name: "Aspirin 500mg".to_string(),
            quantity: 2,
            unit_price: Money::from_cents(1599).unwrap(),
        };
        assert_eq!(item.line_total(), Money::from_cents(3198).unwrap());
    }

    #[test]
    fn test_customer_display_name_falls_back_to_walk_in() {
        assert_eq!(CustomerInfo::default().display_name(), "Walk-in");
        assert_eq!(CustomerInfo::named("John Smith").display_name(), "John Smith");
    }

    #[test]
    fn test_customer_is_empty() {
        assert!(CustomerInfo::default().is_empty());
        assert!(!CustomerInfo::named("John Smith").is_empty());
    }
}
