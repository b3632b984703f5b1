//! Printable receipt rendering.
//!
//! Produces a self-contained HTML document for a finalized transaction.
//! Values flow through the template engine, which escapes them, so customer
//! and product names cannot inject markup.

use askama::Template;
use thiserror::Error;

use crate::models::Transaction;

/// Receipt rendering failed.
#[derive(Debug, Error)]
#[error("receipt render error: {0}")]
pub struct ReceiptError(#[from] askama::Error);

/// One line on the rendered receipt, amounts preformatted.
#[derive(Debug, Clone)]
struct ReceiptLineView {
    name: String,
    quantity: u32,
    total: String,
}

/// Display model for the receipt template.
#[derive(Debug, Clone)]
struct ReceiptView {
    store_name: String,
    id: String,
    date: String,
    time: String,
    customer: String,
    items: Vec<ReceiptLineView>,
    subtotal: String,
    tax: String,
    total: String,
    payment_method: String,
}

#[derive(Template)]
#[template(path = "receipt.html")]
struct ReceiptTemplate {
    receipt: ReceiptView,
}

impl ReceiptView {
    fn from_transaction(transaction: &Transaction, store_name: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            id: transaction.id.to_string(),
            date: transaction.timestamp.format("%Y-%m-%d").to_string(),
            time: transaction.timestamp.format("%H:%M").to_string(),
            customer: transaction.customer.display_name().to_string(),
            items: transaction
                .items
                .iter()
                .map(|i| ReceiptLineView {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    total: i.line_total().to_string(),
                })
                .collect(),
            subtotal: transaction.subtotal.to_string(),
            tax: transaction.tax.to_string(),
            total: transaction.total.to_string(),
            payment_method: transaction.payment_method.to_string().to_uppercase(),
        }
    }
}

/// Render a finalized transaction as a printable HTML receipt.
///
/// # Errors
///
/// Returns `ReceiptError` if the template fails to render.
pub fn render_receipt(transaction: &Transaction, store_name: &str) -> Result<String, ReceiptError> {
    let template = ReceiptTemplate {
        receipt: ReceiptView::from_transaction(transaction, store_name),
    };
    Ok(template.render()?)
}
