//! Transaction history commands: list, export, receipt, refund.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use pharmapos::receipt::{self, ReceiptError};
use pharmapos::{
    AccessRequirement, DatePeriod, PosConfig, TransactionFilter, TransactionLog, export,
};
use pharmapos_core::{Permission, TransactionId};

use super::{CommandError, open_session, require};

/// Errors specific to history commands.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// `--period` was not one of today, week, month, year.
    #[error("invalid period `{0}`; expected today, week, month, or year")]
    InvalidPeriod(String),

    /// No stored transaction with that id.
    #[error("unknown transaction id: {0}")]
    UnknownTransaction(String),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

fn parse_period(period: &str) -> Result<DatePeriod, HistoryError> {
    match period {
        "today" => Ok(DatePeriod::Today),
        "week" => Ok(DatePeriod::Week),
        "month" => Ok(DatePeriod::Month),
        "year" => Ok(DatePeriod::Year),
        other => Err(HistoryError::InvalidPeriod(other.to_owned())),
    }
}

fn open_log() -> Result<TransactionLog, CommandError> {
    let config = PosConfig::from_env()?;
    let session = open_session(&config)?;
    require(&session, AccessRequirement::permission(Permission::Sales))?;
    Ok(TransactionLog::demo())
}

/// List transactions matching a search term and date window, newest first.
pub fn list(search: Option<&str>, period: Option<&str>) -> Result<(), HistoryError> {
    let log = open_log()?;
    let filter = TransactionFilter {
        search: search.map(str::to_owned),
        period: period.map(parse_period).transpose()?,
    };

    let matches = log.query(&filter, Utc::now());
    tracing::info!(count = matches.len(), "transactions found");
    for t in matches {
        tracing::info!(
            id = %t.id,
            date = %t.timestamp.format("%Y-%m-%d %H:%M"),
            customer = %t.customer.display_name(),
            total = %t.total,
            method = %t.payment_method,
        );
    }
    Ok(())
}

/// Export the full history as CSV.
pub fn export_csv(output: Option<&Path>) -> Result<(), HistoryError> {
    let log = open_log()?;
    let rows: Vec<_> = log.transactions().iter().collect();
    let csv = export::transactions_csv(&rows);

    let default = export::transactions_filename(Utc::now().date_naive());
    let path = output.map_or_else(|| Path::new(&default).to_path_buf(), Path::to_path_buf);
    std::fs::write(&path, csv).map_err(CommandError::from)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "transactions exported");
    Ok(())
}

/// Write the printable receipt for a stored transaction.
pub fn receipt(id: &str, output: &Path) -> Result<(), HistoryError> {
    let config = PosConfig::from_env().map_err(CommandError::from)?;
    let session = open_session(&config)?;
    require(&session, AccessRequirement::permission(Permission::Sales))?;

    let log = TransactionLog::demo();
    let transaction = log
        .find(&TransactionId::new(id))
        .ok_or_else(|| HistoryError::UnknownTransaction(id.to_owned()))?;

    let html = receipt::render_receipt(transaction, &config.store_name)?;
    std::fs::write(output, html).map_err(CommandError::from)?;
    tracing::info!(path = %output.display(), "receipt written");
    Ok(())
}

/// Show the refund confirmation for a transaction.
///
/// Confirmation only: nothing is recorded and the stored transaction keeps
/// its status.
pub fn refund(id: &str) -> Result<(), HistoryError> {
    let log = open_log()?;
    let confirmation = log
        .refund_confirmation(&TransactionId::new(id))
        .ok_or_else(|| HistoryError::UnknownTransaction(id.to_owned()))?;

    tracing::warn!(
        id = %confirmation.transaction_id,
        customer = %confirmation.customer,
        total = %confirmation.total,
        "refund requires manager processing; no record was changed"
    );
    Ok(())
}
