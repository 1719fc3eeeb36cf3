//! Display formatting for terminal output

pub mod report;
pub mod transaction;

pub use report::{format_breakdown, format_percentage};
pub use transaction::{
    format_balance_line, format_transaction_details, format_transaction_register,
};
