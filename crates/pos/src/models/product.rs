//! Catalog product domain type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pharmapos_core::{Money, ProductId, StockStatus};

/// A product in the pharmacy catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name (e.g. "Aspirin 500mg").
    pub name: String,
    /// Category label (e.g. "Pain Relief").
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Units on hand.
    pub stock: u32,
    /// Reorder threshold; below this the product counts as low stock.
    pub min_stock: u32,
    /// EAN/UPC barcode digits.
    pub barcode: String,
    /// Expiry date of the current lot.
    pub expiry_date: NaiveDate,
    /// Supplier name.
    pub supplier: String,
}

impl Product {
    /// Stock level derived from the on-hand count and reorder threshold.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.stock < self.min_stock {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(stock: u32, min_stock: u32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Aspirin 500mg".to_string(),
            category: "Pain Relief".to_string(),
            price: Money::from_cents(1599).unwrap(),
            stock,
            min_stock,
            barcode: "123456789012".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            supplier: "MedSupply Co".to_string(),
        }
    }

    #[test]
    fn test_stock_status_out_of_stock() {
        assert_eq!(product(0, 50).stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_stock_status_low() {
        assert_eq!(product(12, 50).stock_status(), StockStatus::Low);
    }

    #[test]
    fn test_stock_status_in_stock() {
        assert_eq!(product(85, 50).stock_status(), StockStatus::InStock);
        // Exactly at the threshold counts as in stock
        assert_eq!(product(50, 50).stock_status(), StockStatus::InStock);
    }
}
