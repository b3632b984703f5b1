//! Inventory commands: list, search, export.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use pharmapos::{AccessRequirement, Catalog, PosConfig, export};
use pharmapos_core::Permission;

use super::{CommandError, open_session, require};

/// Errors specific to inventory commands.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Command(#[from] CommandError),
}

fn open_catalog() -> Result<Catalog, CommandError> {
    let config = PosConfig::from_env()?;
    let session = open_session(&config)?;
    require(&session, AccessRequirement::permission(Permission::Inventory))?;
    Ok(Catalog::demo())
}

/// List catalog products, optionally filtered by name or barcode.
pub fn list(term: Option<&str>) -> Result<(), InventoryError> {
    let catalog = open_catalog()?;
    let products = catalog.search(term.unwrap_or(""));

    tracing::info!(count = products.len(), "products found");
    for p in products {
        tracing::info!(
            id = %p.id,
            name = %p.name,
            price = %p.price,
            stock = p.stock,
            status = %p.stock_status(),
        );
    }
    Ok(())
}

/// Export the catalog as CSV.
pub fn export_csv(output: Option<&Path>) -> Result<(), InventoryError> {
    let catalog = open_catalog()?;
    let csv = export::inventory_csv(catalog.products());

    let default = export::inventory_filename(Utc::now().date_naive());
    let path = output.map_or_else(|| Path::new(&default).to_path_buf(), Path::to_path_buf);
    std::fs::write(&path, csv).map_err(CommandError::from)?;
    tracing::info!(path = %path.display(), "inventory exported");
    Ok(())
}
