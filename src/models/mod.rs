//! Core data models for the finance tracker
//!
//! This module contains the data structures of the ledger domain: users,
//! transactions, category tags and money.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod user;

pub use category::{BreakdownMode, CategorySet, EntryKind};
pub use ids::{TransactionId, UserId};
pub use money::Money;
pub use transaction::{NewEntry, Transaction, TransactionValidationError};
pub use user::User;
