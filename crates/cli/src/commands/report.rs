//! Reporting commands: daily sales summary and low-stock alerts.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use pharmapos::reports::{SalesSummary, low_stock_alerts};
use pharmapos::{AccessRequirement, Catalog, PosConfig, TransactionLog};
use pharmapos_core::Permission;

use super::{CommandError, open_session, require};

/// Errors specific to report commands.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// `--date` did not parse as YYYY-MM-DD.
    #[error("invalid date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Summarize sales for one day (today by default).
pub fn daily(date: Option<&str>) -> Result<(), ReportError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let session = open_session(&config)?;
    require(&session, AccessRequirement::permission(Permission::Reports))?;

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ReportError::InvalidDate(raw.to_owned()))?,
        None => Utc::now().date_naive(),
    };

    let summary = SalesSummary::for_day(&TransactionLog::demo(), date);
    tracing::info!(
        date = %summary.date,
        revenue = %summary.revenue,
        transactions = summary.transaction_count,
        items_sold = summary.items_sold,
        average_sale = %summary.average_sale,
        "daily sales summary"
    );
    Ok(())
}

/// List products at or below their reorder threshold.
pub fn low_stock() -> Result<(), ReportError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let session = open_session(&config)?;
    require(&session, AccessRequirement::permission(Permission::Inventory))?;

    let catalog = Catalog::demo();
    for p in low_stock_alerts(&catalog) {
        tracing::warn!(
            name = %p.name,
            stock = p.stock,
            min_stock = p.min_stock,
            status = %p.stock_status(),
            "reorder needed"
        );
    }
    Ok(())
}
