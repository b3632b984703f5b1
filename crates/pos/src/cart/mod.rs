//! Cart engine: the editable sale in progress.
//!
//! The cart maintains an ordered collection of line items (one per product
//! id), the optional customer details, and the chosen payment method.
//! Totals are derived on demand, never stored. Checkout snapshots the cart
//! into a transaction through a pluggable [`TransactionSubmitter`] and
//! resets the cart only when submission succeeds.

mod submit;

pub use submit::{SubmitError, TransactionDraft, TransactionSubmitter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use pharmapos_core::{Money, PaymentMethod, ProductId, TAX_RATE};

use crate::models::{CustomerInfo, Product, Transaction, TransactionItem};

/// Errors that can occur at checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one line. Callers surface this as a
    /// disabled action rather than an error message.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The submitter refused or failed; the cart is left intact so the
    /// sale can be retried.
    #[error("transaction submission failed: {0}")]
    Submit(#[from] SubmitError),
}

/// One product entry in the sale in progress.
///
/// Invariant: `quantity >= 1`. A line whose quantity would drop to zero or
/// below is removed from the cart instead of being retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    /// Extended price for the line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Derived money amounts for the cart's current state.
///
/// Values are exact decimals; rounding to cents happens only when the
/// amounts are displayed or recorded on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// The sale in progress.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    customer: CustomerInfo,
    payment_method: PaymentMethod,
}

impl Cart {
    /// An empty cart paying cash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new line is appended with quantity 1. No stock ceiling
    /// is enforced at this layer.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: 1,
            });
        }
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or below removes the line entirely, preserving
    /// the invariant that no line exists with quantity < 1. Setting a
    /// quantity for a product not in the cart is a no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        #[allow(clippy::cast_sign_loss)] // positive by the branch above
        let quantity = quantity as u32;
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line unconditionally. No-op when the product is absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Customer details for the sale in progress.
    #[must_use]
    pub const fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Replace the customer details.
    pub fn set_customer(&mut self, customer: CustomerInfo) {
        self.customer = customer;
    }

    /// The selected payment method.
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Select a payment method.
    pub const fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Derive subtotal, tax, and total for the current lines.
    ///
    /// Pure: subtotal = sum of line totals, tax = subtotal x 8%,
    /// total = subtotal + tax. Recomputed on every call; nothing is cached.
    ///
    /// # Panics
    ///
    /// Never panics: subtotal and tax are products and sums of
    /// non-negative amounts.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    pub fn totals(&self) -> Totals {
        let subtotal: Money = self.lines.iter().map(CartLine::line_total).sum();
        let tax = Money::new(subtotal.amount() * TAX_RATE).unwrap();
        let total = subtotal + tax;
        Totals {
            subtotal,
            tax,
            total,
        }
    }

    /// Finalize the sale.
    ///
    /// Snapshots the current lines, totals, customer, and payment method
    /// into a [`TransactionDraft`] and hands it to the submitter. On
    /// success the lines and customer fields reset (the payment method
    /// selection is kept, matching the sales screen). On failure the cart
    /// is untouched so the sale can be retried.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` when there are no lines
    /// - `CheckoutError::Submit` when the submitter fails
    pub fn checkout<S: TransactionSubmitter + ?Sized>(
        &mut self,
        submitter: &mut S,
    ) -> Result<Transaction, CheckoutError> {
        if self.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = self.totals();
        let draft = TransactionDraft {
            customer: self.customer.clone(),
            items: self
                .lines
                .iter()
                .map(|l| TransactionItem {
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
            subtotal: totals.subtotal.rounded(),
            tax: totals.tax.rounded(),
            total: totals.total.rounded(),
            payment_method: self.payment_method,
        };

        let transaction = submitter.submit(draft)?;

        info!(
            id = %transaction.id,
            total = %transaction.total,
            method = %transaction.payment_method,
            "sale completed"
        );
        self.lines.clear();
        self.customer = CustomerInfo::default();
        Ok(transaction)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::catalog::Catalog;

    fn product(id: i32, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: "Test".to_string(),
            price: Money::from_cents(cents).unwrap(),
            stock: 10,
            min_stock: 5,
            barcode: format!("00000000000{id}"),
            expiry_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            supplier: "Test Supply".to_string(),
        }
    }

    /// Submitter that always fails, for exercising the retry path.
    struct FailingSubmitter;

    impl TransactionSubmitter for FailingSubmitter {
        fn submit(&mut self, _draft: TransactionDraft) -> Result<Transaction, SubmitError> {
            Err(SubmitError::Rejected("backend unavailable".to_string()))
        }
    }

    #[test]
    fn test_add_item_new_line_quantity_one() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Aspirin 500mg", 1599));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_add_item_existing_increments() {
        let mut cart = Cart::new();
        let aspirin = product(1, "Aspirin 500mg", 1599);
        cart.add_item(&aspirin);
        cart.add_item(&aspirin);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Aspirin 500mg", 1599));
        cart.set_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Aspirin 500mg", 1599));
        cart.set_quantity(ProductId::new(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_sequence_leaves_nonpositive_quantity() {
        let mut cart = Cart::new();
        let aspirin = product(1, "Aspirin 500mg", 1599);
        let vitamin = product(2, "Vitamin C 1000mg", 1250);

        cart.add_item(&aspirin);
        cart.add_item(&vitamin);
        cart.set_quantity(ProductId::new(1), 5);
        cart.set_quantity(ProductId::new(1), -1);
        cart.add_item(&aspirin);
        cart.set_quantity(ProductId::new(2), 0);
        cart.remove_item(ProductId::new(99));
        cart.add_item(&vitamin);

        for line in cart.lines() {
            assert!(line.quantity >= 1, "line {} has quantity 0", line.name);
        }
    }

    #[test]
    fn test_remove_item_noop_when_absent() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Aspirin 500mg", 1599));
        cart.remove_item(ProductId::new(2));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_totals_reference_scenario() {
        // Aspirin 15.99 x2 + Vitamin C 12.50 x1:
        // subtotal 44.48, tax 3.5584 (-> 3.56), total 48.0384 (-> 48.04)
        let mut cart = Cart::new();
        let aspirin = product(1, "Aspirin 500mg", 1599);
        cart.add_item(&aspirin);
        cart.add_item(&aspirin);
        cart.add_item(&product(2, "Vitamin C 1000mg", 1250));

        let totals = cart.totals();
        assert_eq!(totals.subtotal.amount(), Decimal::new(4448, 2));
        assert_eq!(totals.tax.amount(), Decimal::new(35584, 4));
        assert_eq!(totals.tax.rounded().amount(), Decimal::new(356, 2));
        assert_eq!(totals.total.rounded().amount(), Decimal::new(4804, 2));
    }

    #[test]
    fn test_totals_pure_and_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Aspirin 500mg", 1599));
        let first = cart.totals();
        let second = cart.totals();
        assert_eq!(first, second);
        assert_eq!(first.tax.amount(), first.subtotal.amount() * TAX_RATE);
    }

    #[test]
    fn test_totals_empty_cart_all_zero() {
        let totals = Cart::new().totals();
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let mut cart = Cart::new();
        let mut log = crate::transactions::TransactionLog::empty();
        let err = cart.checkout(&mut log).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert!(log.transactions().is_empty());
    }

    #[test]
    fn test_checkout_resets_cart_and_customer() {
        let catalog = Catalog::demo();
        let mut cart = Cart::new();
        cart.add_item(catalog.get(ProductId::new(1)).unwrap());
        cart.set_customer(CustomerInfo::named("John Smith"));
        cart.set_payment_method(PaymentMethod::Card);

        let mut log = crate::transactions::TransactionLog::empty();
        let transaction = cart.checkout(&mut log).unwrap();

        assert!(cart.is_empty());
        assert!(cart.customer().is_empty());
        // Payment method selection survives, matching the sales screen
        assert_eq!(cart.payment_method(), PaymentMethod::Card);
        assert_eq!(transaction.payment_method, PaymentMethod::Card);
        assert_eq!(log.transactions().len(), 1);
    }

    #[test]
    fn test_checkout_failure_leaves_cart_intact() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Aspirin 500mg", 1599));
        cart.set_customer(CustomerInfo::named("John Smith"));

        let err = cart.checkout(&mut FailingSubmitter).unwrap_err();
        assert!(matches!(err, CheckoutError::Submit(_)));
        assert_eq!(cart.lines().len(), 1);
        assert!(!cart.customer().is_empty());
    }

    #[test]
    fn test_checkout_records_rounded_amounts() {
        let mut cart = Cart::new();
        let aspirin = product(1, "Aspirin 500mg", 1599);
        cart.add_item(&aspirin);
        cart.add_item(&aspirin);
        cart.add_item(&product(2, "Vitamin C 1000mg", 1250));

        let mut log = crate::transactions::TransactionLog::empty();
        let transaction = cart.checkout(&mut log).unwrap();

        assert_eq!(transaction.subtotal.amount(), Decimal::new(4448, 2));
        assert_eq!(transaction.tax.amount(), Decimal::new(356, 2));
        assert_eq!(transaction.total.amount(), Decimal::new(4804, 2));
    }
}
