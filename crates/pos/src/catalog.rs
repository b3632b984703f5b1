//! Product catalog: the lookup source for sales and inventory views.
//!
//! The catalog is a fixed in-memory dataset in this prototype; stock counts
//! are informational and never decremented by checkout.

use pharmapos_core::{Money, ProductId, StockStatus};

use crate::models::Product;

/// In-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo pharmacy catalog.
    ///
    /// # Panics
    ///
    /// Never panics; the seeded literals are valid.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    pub fn demo() -> Self {
        #[allow(clippy::too_many_arguments)]
        fn product(
            id: i32,
            name: &str,
            category: &str,
            cents: i64,
            stock: u32,
            min_stock: u32,
            barcode: &str,
            expiry: (i32, u32, u32),
            supplier: &str,
        ) -> Product {
            Product {
                id: ProductId::new(id),
                name: name.to_string(),
                category: category.to_string(),
                price: Money::from_cents(cents).unwrap(),
                stock,
                min_stock,
                barcode: barcode.to_string(),
                expiry_date: chrono::NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2)
                    .unwrap(),
                supplier: supplier.to_string(),
            }
        }

        Self::new(vec![
            product(
                1,
                "Aspirin 500mg",
                "Pain Relief",
                1599,
                12,
                50,
                "123456789012",
                (2025, 6, 15),
                "MedSupply Co",
            ),
            product(
                2,
                "Vitamin C 1000mg",
                "Vitamins",
                1250,
                85,
                100,
                "123456789013",
                (2025, 12, 1),
                "HealthPlus Inc",
            ),
            product(
                3,
                "Paracetamol 500mg",
                "Pain Relief",
                899,
                156,
                200,
                "123456789014",
                (2025, 3, 20),
                "MedSupply Co",
            ),
            product(
                4,
                "Insulin Pen",
                "Diabetes Care",
                8000,
                8,
                30,
                "123456789015",
                (2025, 9, 10),
                "DiabetesCare Ltd",
            ),
            product(
                5,
                "Blood Pressure Monitor",
                "Medical Devices",
                12000,
                15,
                25,
                "123456789016",
                (2027, 1, 1),
                "MedTech Solutions",
            ),
            product(
                6,
                "Thermometer Digital",
                "Medical Devices",
                1500,
                45,
                20,
                "123456789017",
                (2026, 8, 15),
                "MedTech Solutions",
            ),
            product(
                7,
                "Amoxicillin 500mg",
                "Antibiotics",
                2599,
                0,
                50,
                "123456789018",
                (2025, 4, 30),
                "Pharma Direct",
            ),
            product(
                8,
                "Omega-3 Fish Oil",
                "Vitamins",
                2250,
                120,
                80,
                "123456789019",
                (2025, 10, 15),
                "HealthPlus Inc",
            ),
        ])
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Search by name (case-insensitive substring) or barcode substring.
    ///
    /// An empty term matches everything, so the sales screen can show the
    /// full product list before the operator types.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle) || p.barcode.contains(term))
            .collect()
    }

    /// Products at or below their minimum stock level, including those
    /// fully out of stock.
    #[must_use]
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.stock_status() != StockStatus::InStock)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_name_case_insensitive() {
        let catalog = Catalog::demo();
        let hits = catalog.search("aspirin");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Aspirin 500mg");
    }

    #[test]
    fn test_search_by_barcode_substring() {
        let catalog = Catalog::demo();
        let hits = catalog.search("789015");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Insulin Pen");
    }

    #[test]
    fn test_empty_term_matches_all() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.search("").len(), catalog.products().len());
    }

    #[test]
    fn test_no_match_yields_empty() {
        let catalog = Catalog::demo();
        assert!(catalog.search("banana").is_empty());
    }

    #[test]
    fn test_stock_status_derivation() {
        let catalog = Catalog::demo();
        // Amoxicillin: stock 0
        assert_eq!(
            catalog.get(ProductId::new(7)).unwrap().stock_status(),
            StockStatus::OutOfStock
        );
        // Aspirin: 12 on hand, minimum 50
        assert_eq!(
            catalog.get(ProductId::new(1)).unwrap().stock_status(),
            StockStatus::Low
        );
        // Omega-3: 120 on hand, minimum 80
        assert_eq!(
            catalog.get(ProductId::new(8)).unwrap().stock_status(),
            StockStatus::InStock
        );
    }

    #[test]
    fn test_low_stock_excludes_healthy_products() {
        let catalog = Catalog::demo();
        let low = catalog.low_stock();
        assert!(low.iter().all(|p| p.stock_status() != StockStatus::InStock));
        // Aspirin, Vitamin C, Paracetamol, Insulin Pen, BP Monitor, Amoxicillin
        assert_eq!(low.len(), 6);
    }
}
