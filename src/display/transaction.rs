//! Ledger display formatting
//!
//! Register views of a user's entries: one row per entry with its ID,
//! signed amount, description, tags and date, and a balance footer.

use chrono::Local;

use crate::config::Settings;
use crate::models::{Money, Transaction};

use super::report::truncate;

const REGISTER_WIDTH: usize = 84;

/// Format a single entry as a register row
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    format!(
        "{:<8} {:>13}  {:<24} {:<18} {}",
        txn.id.to_string(),
        txn.amount.format_signed(&settings.currency_symbol),
        truncate(&txn.description, 24),
        truncate(&txn.categories.label(), 18),
        txn.date.with_timezone(&Local).format(&settings.date_format)
    )
}

/// Format entries as a register
pub fn format_transaction_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:>13}  {:<24} {:<18} {}\n",
        "ID", "Amount", "Description", "Tags", "Date"
    ));
    output.push_str(&"-".repeat(REGISTER_WIDTH));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    output
}

/// Format the balance line shown under the register
pub fn format_balance_line(balance: Money, settings: &Settings) -> String {
    format!(
        "Current Balance: {}\n",
        balance.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format one entry in full
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.date.with_timezone(&Local).format(&settings.date_format)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_signed(&settings.currency_symbol)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Tags:        {}\n", txn.categories));
    output.push_str(&format!(
        "Type:        {}\n",
        if txn.is_income() { "Income" } else { "Expense" }
    ));

    output
}
