//! Ledger service
//!
//! Adds, lists and deletes a user's entries. Every call takes the caller's
//! `Session`; the session's user is the only owner the service reads or
//! writes.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{CategorySet, Money, NewEntry, Transaction, TransactionId};
use crate::storage::Storage;

use super::Session;

/// Service for ledger entries
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store an entry stamped with the current time
    ///
    /// No validation happens here; `record` is the checked path.
    pub fn add_entry(
        &self,
        session: &Session,
        amount: Money,
        description: &str,
        categories: &CategorySet,
    ) -> FinanceResult<Transaction> {
        let txn = self.storage.transactions.insert(
            session.user_id(),
            amount,
            description,
            categories,
            Utc::now(),
        )?;
        info!(
            user_id = %session.user_id(),
            transaction_id = %txn.id,
            amount = txn.amount.cents(),
            "added entry"
        );
        Ok(txn)
    }

    /// Validate form input, apply the income/expense sign, and store it
    pub fn record(&self, session: &Session, entry: NewEntry) -> FinanceResult<Transaction> {
        entry
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.add_entry(
            session,
            entry.signed_amount(),
            entry.description.trim(),
            &entry.categories,
        )
    }

    /// All entries, most recent first
    pub fn list_entries(&self, session: &Session) -> FinanceResult<Vec<Transaction>> {
        let entries = self.storage.transactions.list_for_user(session.user_id())?;
        debug!(user_id = %session.user_id(), count = entries.len(), "listed entries");
        Ok(entries)
    }

    /// Get a single entry by ID
    pub fn get_entry(
        &self,
        session: &Session,
        id: TransactionId,
    ) -> FinanceResult<Option<Transaction>> {
        self.storage.transactions.get(session.user_id(), id)
    }

    /// Delete an entry by ID. Returns false if the user has no such entry.
    pub fn delete_entry(&self, session: &Session, id: TransactionId) -> FinanceResult<bool> {
        let removed = self.storage.transactions.delete(session.user_id(), id)?;
        if removed {
            info!(user_id = %session.user_id(), transaction_id = %id, "deleted entry");
        }
        Ok(removed)
    }

    /// Delete entries by value. Every entry equal in all fields is removed;
    /// returns how many were.
    pub fn delete_matching(
        &self,
        session: &Session,
        amount: Money,
        description: &str,
        categories: &CategorySet,
        date: DateTime<Utc>,
    ) -> FinanceResult<usize> {
        let removed = self.storage.transactions.delete_matching(
            session.user_id(),
            amount,
            description,
            categories,
            date,
        )?;
        info!(user_id = %session.user_id(), removed, "deleted matching entries");
        Ok(removed)
    }
}
