//! Finance Tracker - personal income and expense ledger
//!
//! This library provides the core of a multi-user personal finance tracker:
//! credential storage with salted password hashes, a per-user ledger of
//! tagged income and expense entries, and balance and category breakdowns
//! computed from that ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, transactions, money, tag sets)
//! - `crypto`: Password hashing and zeroizing secrets
//! - `storage`: SQLite storage layer
//! - `services`: Credentials, sessions, ledger and aggregation
//! - `reports`: Income/expense breakdown reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `finance` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{FinancePaths, Settings};
//! use finance_tracker::services::{CredentialService, LedgerService, SessionState};
//! use finance_tracker::storage::Storage;
//!
//! let paths = FinancePaths::new()?;
//! let storage = Storage::new(&paths)?;
//! let credentials = CredentialService::new(&storage);
//! credentials.register("alice", "hunter2")?;
//!
//! let mut state = SessionState::new();
//! let session = state.login(&credentials, "alice", "hunter2")?;
//! let entries = LedgerService::new(&storage).list_entries(session)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::FinanceError;
