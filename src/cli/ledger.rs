//! Ledger CLI commands
//!
//! Adding, listing and deleting entries for the logged-in user.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{
    format_balance_line, format_transaction_details, format_transaction_register,
};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{CategorySet, EntryKind, NewEntry, TransactionId};
use crate::services::{AggregationService, LedgerService, Session};
use crate::storage::Storage;

/// Ledger subcommands
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// Record an income or expense entry
    Add {
        /// Entry kind: income or expense
        kind: String,
        /// Amount, unsigned (e.g., "50.00")
        amount: String,
        /// Description
        description: String,
        /// Category tag; repeat for several
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,
    },
    /// List entries, most recent first
    List {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the current balance
    Balance,
    /// Show one entry
    Show {
        /// Entry ID (e.g., "txn-3" or "3")
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID (e.g., "txn-3" or "3")
        id: String,
    },
}

fn parse_id(id: &str) -> FinanceResult<TransactionId> {
    id.parse()
        .map_err(|_| FinanceError::Validation(format!("Invalid transaction ID: {}", id)))
}

/// Handle a ledger command for an authenticated session
pub fn handle_ledger_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: LedgerCommands,
) -> FinanceResult<()> {
    let ledger = LedgerService::new(storage);

    match cmd {
        LedgerCommands::Add {
            kind,
            amount,
            description,
            tags,
        } => {
            let kind = EntryKind::parse(&kind).ok_or_else(|| {
                FinanceError::Validation(format!(
                    "Unknown entry kind '{}'; use income or expense",
                    kind
                ))
            })?;
            let entry = NewEntry::from_input(kind, &amount, description, CategorySet::from_tags(tags))
                .map_err(|e| FinanceError::Validation(e.to_string()))?;

            let txn = ledger.record(session, entry)?;
            println!(
                "Added {}: {} {} [{}]",
                txn.id,
                txn.amount.format_signed(&settings.currency_symbol),
                txn.description,
                txn.categories
            );
        }

        LedgerCommands::List { limit } => {
            let mut entries = ledger.list_entries(session)?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            let balance = AggregationService::new(storage).total_balance(session)?;

            print!("{}", format_transaction_register(&entries, settings));
            println!();
            print!("{}", format_balance_line(balance, settings));
        }

        LedgerCommands::Balance => {
            let balance = AggregationService::new(storage).total_balance(session)?;
            print!("{}", format_balance_line(balance, settings));
        }

        LedgerCommands::Show { id } => {
            let id = parse_id(&id)?;
            let txn = ledger
                .get_entry(session, id)?
                .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        LedgerCommands::Delete { id } => {
            let id = parse_id(&id)?;
            if !ledger.delete_entry(session, id)? {
                return Err(FinanceError::transaction_not_found(id.to_string()));
            }
            println!("Deleted {}", id);
        }
    }

    Ok(())
}
