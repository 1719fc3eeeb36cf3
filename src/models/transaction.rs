//! Transaction model
//!
//! A ledger entry: a signed amount with a description, a set of category
//! tags, and the moment it was recorded.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{CategorySet, EntryKind};
use super::ids::{TransactionId, UserId};
use super::money::Money;

/// A recorded income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user who owns this entry
    pub user_id: UserId,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Category tags
    pub categories: CategorySet,

    /// When the entry was recorded
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Check if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// The stored form of the timestamp
    pub fn date_string(&self) -> String {
        format_timestamp(&self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.categories,
            self.amount.format_signed("$")
        )
    }
}

/// Timestamps are stored as fixed-width RFC 3339 in UTC so that text order
/// matches time order.
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc))
}

/// User input for a new entry, before sign and validation are applied
///
/// The amount is entered unsigned; the kind decides whether it is stored
/// as income or expense.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub kind: EntryKind,
    pub amount: Money,
    pub description: String,
    pub categories: CategorySet,
}

impl NewEntry {
    /// Create a new entry
    pub fn new(
        kind: EntryKind,
        amount: Money,
        description: impl Into<String>,
        categories: CategorySet,
    ) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            categories,
        }
    }

    /// Build an entry from raw form input, parsing the amount text
    pub fn from_input(
        kind: EntryKind,
        amount: &str,
        description: impl Into<String>,
        categories: CategorySet,
    ) -> Result<Self, TransactionValidationError> {
        let amount = Money::parse(amount)
            .map_err(|_| TransactionValidationError::InvalidAmount(amount.trim().to_string()))?;
        Ok(Self::new(kind, amount, description, categories))
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if self.categories.is_empty() {
            return Err(TransactionValidationError::NoCategory);
        }

        Ok(())
    }

    /// The amount as it will be stored: negated for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}

/// Validation errors for new entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    InvalidAmount(String),
    NonPositiveAmount(Money),
    EmptyDescription,
    NoCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(s) => write!(f, "Invalid amount: '{}'", s),
            Self::NonPositiveAmount(m) => write!(f, "Amount must be greater than zero, got {}", m),
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::NoCategory => write!(f, "At least one category is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
