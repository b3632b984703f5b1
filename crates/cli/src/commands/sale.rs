//! One-shot sale: build a cart, check out, optionally write a receipt.

use std::path::Path;

use thiserror::Error;

use pharmapos::receipt::{self, ReceiptError};
use pharmapos::{Cart, Catalog, CheckoutError, CustomerInfo, PosConfig, Product, TransactionLog};
use pharmapos_core::{PaymentMethod, Permission, ProductId};

use super::{CommandError, open_session, require};

/// Errors specific to the sale command.
#[derive(Debug, Error)]
pub enum SaleError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// An `--item` argument did not parse as `ID` or `ID:QTY`.
    #[error("invalid item spec `{0}`; expected ID or ID:QTY")]
    InvalidItemSpec(String),

    /// No catalog product with that id.
    #[error("unknown product id: {0}")]
    UnknownProduct(i32),

    /// Accumulated quantity for one product left the supported range.
    #[error("quantity for product {0} is too large")]
    QuantityTooLarge(ProductId),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Parse an `--item` argument: `4` means one unit, `1:2` means two.
fn parse_item(spec: &str) -> Result<(i32, u32), SaleError> {
    let invalid = || SaleError::InvalidItemSpec(spec.to_owned());

    match spec.split_once(':') {
        None => spec.parse().map(|id| (id, 1)).map_err(|_| invalid()),
        Some((id, qty)) => {
            let id = id.parse().map_err(|_| invalid())?;
            let qty: u32 = qty.parse().map_err(|_| invalid())?;
            if qty == 0 {
                return Err(invalid());
            }
            Ok((id, qty))
        }
    }
}

/// Add `qty` units of a product, accumulating with any units already in
/// the cart. Returns the resulting line quantity.
///
/// Repeated `--item` specs for the same product add up; they do not
/// overwrite each other. Totals that overflow the quantity range are
/// rejected rather than wrapped.
fn add_units(cart: &mut Cart, product: &Product, qty: u32) -> Result<u32, SaleError> {
    let existing = cart
        .lines()
        .iter()
        .find(|l| l.product_id == product.id)
        .map_or(0, |l| l.quantity);

    let total = existing
        .checked_add(qty)
        .ok_or(SaleError::QuantityTooLarge(product.id))?;
    let set = i32::try_from(total).map_err(|_| SaleError::QuantityTooLarge(product.id))?;

    cart.add_item(product);
    cart.set_quantity(product.id, set);
    Ok(total)
}

/// Ring up a sale against the demo catalog.
pub fn run(
    items: &[String],
    customer: Option<&str>,
    method: PaymentMethod,
    receipt_path: Option<&Path>,
) -> Result<(), SaleError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let session = open_session(&config)?;
    require(&session, pharmapos::AccessRequirement::permission(Permission::Sales))?;

    let catalog = Catalog::demo();
    let mut log = TransactionLog::demo();

    let mut cart = Cart::new();
    for spec in items {
        let (id, qty) = parse_item(spec)?;
        let product = catalog
            .get(ProductId::new(id))
            .ok_or(SaleError::UnknownProduct(id))?;
        let total = add_units(&mut cart, product, qty)?;
        // Stock is informational; warn but do not block the sale
        if total > product.stock {
            tracing::warn!(
                product = %product.name,
                requested = total,
                on_hand = product.stock,
                "quantity exceeds known stock"
            );
        }
    }
    if let Some(name) = customer {
        cart.set_customer(CustomerInfo::named(name));
    }
    cart.set_payment_method(method);

    let totals = cart.totals();
    tracing::info!(
        subtotal = %totals.subtotal,
        tax = %totals.tax,
        total = %totals.total,
        "cart ready"
    );

    let transaction = cart.checkout(&mut log)?;

    if let Some(path) = receipt_path {
        let html = receipt::render_receipt(&transaction, &config.store_name)?;
        std::fs::write(path, html).map_err(CommandError::from)?;
        tracing::info!(path = %path.display(), "receipt written");
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_bare_id() {
        assert_eq!(parse_item("4").unwrap(), (4, 1));
    }

    #[test]
    fn test_parse_item_with_quantity() {
        assert_eq!(parse_item("1:2").unwrap(), (1, 2));
    }

    #[test]
    fn test_parse_item_rejects_garbage() {
        assert!(parse_item("one").is_err());
        assert!(parse_item("1:").is_err());
        assert!(parse_item("1:0").is_err());
        assert!(parse_item("1:-2").is_err());
    }

    #[test]
    fn test_repeated_specs_accumulate() {
        let catalog = Catalog::demo();
        let aspirin = catalog.get(ProductId::new(1)).unwrap();

        let mut cart = Cart::new();
        add_units(&mut cart, aspirin, 1).unwrap();
        let total = add_units(&mut cart, aspirin, 5).unwrap();

        assert_eq!(total, 6);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 6);
    }

    #[test]
    fn test_huge_quantity_rejected_not_wrapped() {
        let catalog = Catalog::demo();
        let aspirin = catalog.get(ProductId::new(1)).unwrap();

        let mut cart = Cart::new();
        let err = add_units(&mut cart, aspirin, u32::MAX).unwrap_err();
        assert!(matches!(err, SaleError::QuantityTooLarge(_)));
        // The failed add leaves no line behind
        assert!(cart.is_empty());

        // Overflow of the running total is also rejected
        add_units(&mut cart, aspirin, 1).unwrap();
        let err = add_units(&mut cart, aspirin, u32::MAX).unwrap_err();
        assert!(matches!(err, SaleError::QuantityTooLarge(_)));
        assert_eq!(cart.lines()[0].quantity, 1);
    }
}
