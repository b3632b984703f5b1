//! End-to-end sale: guard the sales screen, build a cart, check out, then
//! drive the downstream outputs (history query, receipt, CSV export).

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use pharmapos::guard::{self, AccessRequirement};
use pharmapos::receipt::render_receipt;
use pharmapos::{
    Cart, Catalog, CheckoutError, CustomerInfo, DatePeriod, TransactionFilter, TransactionLog,
    export,
};
use pharmapos_core::{PaymentMethod, Permission, ProductId};

use pharmapos_integration_tests::signed_in;

// =============================================================================
// Full Sale Flow
// =============================================================================

#[test]
fn test_salesperson_completes_reference_sale() {
    // Mike may sell
    let session = signed_in("mike@pharmacy.com");
    assert!(
        guard::evaluate(&session, AccessRequirement::permission(Permission::Sales)).is_granted()
    );

    let catalog = Catalog::demo();
    let mut log = TransactionLog::demo();
    let mut cart = Cart::new();

    // Two Aspirin, one Vitamin C: the seeded TXN-2024-001 basket
    let aspirin = catalog.get(ProductId::new(1)).expect("seeded");
    cart.add_item(aspirin);
    cart.add_item(aspirin);
    cart.add_item(catalog.get(ProductId::new(2)).expect("seeded"));
    cart.set_customer(CustomerInfo::named("John Smith"));
    cart.set_payment_method(PaymentMethod::Cash);

    let transaction = cart.checkout(&mut log).expect("checkout succeeds");

    assert_eq!(transaction.subtotal.amount(), Decimal::new(4448, 2));
    assert_eq!(transaction.tax.amount(), Decimal::new(356, 2));
    assert_eq!(transaction.total.amount(), Decimal::new(4804, 2));
    let year = Utc::now().year();
    assert_eq!(transaction.id.as_str(), format!("TXN-{year}-006"));

    // Cart is ready for the next customer
    assert!(cart.is_empty());
    assert!(cart.customer().is_empty());

    // The sale is now the newest history row
    assert_eq!(log.transactions().len(), 6);
    assert_eq!(log.transactions()[0].id, transaction.id);
}

#[test]
fn test_new_sale_appears_in_todays_history() {
    let catalog = Catalog::demo();
    let mut log = TransactionLog::demo();
    let mut cart = Cart::new();
    cart.add_item(catalog.get(ProductId::new(4)).expect("seeded"));
    let transaction = cart.checkout(&mut log).expect("checkout succeeds");

    let today = log.query(
        &TransactionFilter {
            search: None,
            period: Some(DatePeriod::Today),
        },
        Utc::now(),
    );
    assert!(today.iter().any(|t| t.id == transaction.id));
    // The 2024-01-15 seed data is not from today
    assert_eq!(today.len(), 1);
}

#[test]
fn test_empty_cart_cannot_check_out() {
    let mut log = TransactionLog::demo();
    let mut cart = Cart::new();
    let err = cart.checkout(&mut log).expect_err("must refuse");
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(log.transactions().len(), 5);
}

// =============================================================================
// Downstream Outputs
// =============================================================================

#[test]
fn test_receipt_renders_fresh_sale() {
    let catalog = Catalog::demo();
    let mut log = TransactionLog::demo();
    let mut cart = Cart::new();
    cart.add_item(catalog.get(ProductId::new(5)).expect("seeded"));
    cart.set_customer(CustomerInfo::named("Robert Brown"));
    let transaction = cart.checkout(&mut log).expect("checkout succeeds");

    let html = render_receipt(&transaction, "PharmaPOS").expect("render");
    assert!(html.contains("<h2>PharmaPOS</h2>"));
    assert!(html.contains(transaction.id.as_str()));
    assert!(html.contains("Robert Brown"));
    assert!(html.contains("$129.60")); // 120.00 + 8% tax
    assert!(html.contains("Thank you for your business!"));
}

#[test]
fn test_csv_export_includes_fresh_sale() {
    let catalog = Catalog::demo();
    let mut log = TransactionLog::demo();
    let mut cart = Cart::new();
    cart.add_item(catalog.get(ProductId::new(3)).expect("seeded"));
    cart.set_customer(CustomerInfo::named("Garcia, Maria"));
    let transaction = cart.checkout(&mut log).expect("checkout succeeds");

    let rows: Vec<_> = log.transactions().iter().collect();
    let csv = export::transactions_csv(&rows);

    assert!(csv.starts_with("Transaction ID,Date,Time,Customer,Items,Payment Method,Total\n"));
    assert_eq!(csv.lines().count(), 7); // header + 5 seeded + 1 fresh
    assert!(csv.contains(transaction.id.as_str()));
    // Comma in the customer name forces quoting
    assert!(csv.contains("\"Garcia, Maria\""));
}
