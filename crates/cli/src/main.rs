//! PharmaPOS CLI - sessions, sales, and exports from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session persists under POS_DATA_DIR)
//! pos-cli login -e sarah@pharmacy.com -p secret
//!
//! # Ring up a sale: two Aspirin, one Vitamin C, paid by card
//! pos-cli sale --item 1:2 --item 2 --customer "John Smith" --method card
//!
//! # Browse and export history
//! pos-cli history list --search garcia --period today
//! pos-cli history export -o transactions.csv
//! pos-cli history receipt TXN-2024-001 -o receipt.html
//!
//! # Inventory and reports
//! pos-cli inventory list aspirin
//! pos-cli report daily --date 2024-01-15
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` / `switch-user` - session management
//! - `sale` - build a cart and check out
//! - `history` - list, export, print receipts, refund lookups
//! - `inventory` - list and export the catalog
//! - `report` - daily summary and low-stock alerts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use pharmapos_core::PaymentMethod;

mod commands;

#[derive(Parser)]
#[command(name = "pos-cli")]
#[command(author, version, about = "PharmaPOS command line tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a staff user
    Login {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Password (any non-empty value in the demo build)
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the active session
    Whoami,
    /// Switch to another demo user (requires POS_DEMO_MODE=true)
    SwitchUser {
        /// Target user id
        #[arg(long)]
        id: i32,
    },
    /// Ring up a sale
    Sale {
        /// Product to add, as ID or ID:QTY; repeatable
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Customer name (walk-in if omitted)
        #[arg(long)]
        customer: Option<String>,

        /// Payment method: cash, card, or insurance
        #[arg(long, default_value = "cash")]
        method: PaymentMethod,

        /// Write a printable HTML receipt here
        #[arg(long)]
        receipt: Option<PathBuf>,
    },
    /// Browse and export the transaction history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Browse and export the product catalog
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Sales and stock reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List transactions, newest first
    List {
        /// Match against transaction id or customer name
        #[arg(long)]
        search: Option<String>,

        /// Restrict to a window: today, week, month, year
        #[arg(long)]
        period: Option<String>,
    },
    /// Export the history as CSV
    Export {
        /// Output path (default: transactions_YYYY-MM-DD.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the printable receipt for a transaction
    Receipt {
        /// Transaction id (e.g. TXN-2024-001)
        id: String,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show the refund confirmation for a transaction
    Refund {
        /// Transaction id
        id: String,
    },
}

#[derive(Subcommand)]
enum InventoryAction {
    /// List products, optionally filtered by name or barcode
    List {
        /// Search term
        term: Option<String>,
    },
    /// Export the catalog as CSV
    Export {
        /// Output path (default: inventory_YYYY-MM-DD.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ReportAction {
    /// Summarize one day of sales
    Daily {
        /// Day to summarize, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List products needing a reorder
    LowStock,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&email, SecretString::from(password))?;
        }
        Commands::Logout => commands::session::logout()?,
        Commands::Whoami => commands::session::whoami()?,
        Commands::SwitchUser { id } => commands::session::switch_user(id)?,
        Commands::Sale {
            items,
            customer,
            method,
            receipt,
        } => {
            commands::sale::run(&items, customer.as_deref(), method, receipt.as_deref())?;
        }
        Commands::History { action } => match action {
            HistoryAction::List { search, period } => {
                commands::history::list(search.as_deref(), period.as_deref())?;
            }
            HistoryAction::Export { output } => {
                commands::history::export_csv(output.as_deref())?;
            }
            HistoryAction::Receipt { id, output } => {
                commands::history::receipt(&id, &output)?;
            }
            HistoryAction::Refund { id } => commands::history::refund(&id)?,
        },
        Commands::Inventory { action } => match action {
            InventoryAction::List { term } => commands::inventory::list(term.as_deref())?,
            InventoryAction::Export { output } => {
                commands::inventory::export_csv(output.as_deref())?;
            }
        },
        Commands::Report { action } => match action {
            ReportAction::Daily { date } => commands::report::daily(date.as_deref())?,
            ReportAction::LowStock => commands::report::low_stock()?,
        },
    }
    Ok(())
}
