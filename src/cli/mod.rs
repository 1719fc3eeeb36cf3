//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod ledger;
pub mod report;

pub use auth::{handle_register, read_password, with_session};
pub use ledger::{handle_ledger_command, LedgerCommands};
pub use report::{handle_report_command, print_default_tags, ReportCommands};
