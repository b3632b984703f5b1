//! CSV export for transaction history and inventory.
//!
//! Fields are quoted per RFC 4180 whenever they contain a comma, quote, or
//! newline, so customer names and item lists survive a round trip through a
//! spreadsheet.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Product, Transaction};

/// Quote a field per RFC 4180 when it needs it.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row(out: &mut String, fields: &[String]) {
    let row = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    // Writing to a String cannot fail
    let _ = writeln!(out, "{row}");
}

/// Render a transaction list as CSV, in the given order.
///
/// Items are flattened into one field: `Name xQty; Name xQty`. Dates and
/// times are the transaction's UTC timestamp.
#[must_use]
pub fn transactions_csv(transactions: &[&Transaction]) -> String {
    let mut csv = String::from("Transaction ID,Date,Time,Customer,Items,Payment Method,Total\n");
    for t in transactions {
        let items = t
            .items
            .iter()
            .map(|i| format!("{} x{}", i.name, i.quantity))
            .collect::<Vec<_>>()
            .join("; ");
        write_row(
            &mut csv,
            &[
                t.id.to_string(),
                t.timestamp.format("%Y-%m-%d").to_string(),
                t.timestamp.format("%H:%M").to_string(),
                t.customer.display_name().to_string(),
                items,
                t.payment_method.to_string(),
                format!("{:.2}", t.total.rounded().amount()),
            ],
        );
    }
    csv
}

/// Render the product catalog as CSV, in catalog order.
#[must_use]
pub fn inventory_csv(products: &[Product]) -> String {
    let mut csv = String::from(
        "Name,Category,Barcode,Current Stock,Min Stock,Price,Supplier,Expiry Date,Status\n",
    );
    for p in products {
        write_row(
            &mut csv,
            &[
                p.name.clone(),
                p.category.clone(),
                p.barcode.clone(),
                p.stock.to_string(),
                p.min_stock.to_string(),
                format!("{:.2}", p.price.rounded().amount()),
                p.supplier.clone(),
                p.expiry_date.format("%Y-%m-%d").to_string(),
                p.stock_status().to_string(),
            ],
        );
    }
    csv
}

/// Download filename for a transaction export on the given date.
#[must_use]
pub fn transactions_filename(date: NaiveDate) -> String {
    format!("transactions_{}.csv", date.format("%Y-%m-%d"))
}

/// Download filename for an inventory export on the given date.
#[must_use]
pub fn inventory_filename(date: NaiveDate) -> String {
    format!("inventory_{}.csv", date.format("%Y-%m-%d"))
}
