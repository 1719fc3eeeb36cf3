//! Aggregation service
//!
//! Balance and per-category sums over a user's ledger. Everything is
//! recomputed from storage on each call.

use std::cmp::Ordering;

use crate::error::FinanceResult;
use crate::models::{BreakdownMode, CategorySet, Money, Transaction};
use crate::storage::{GroupTotal, Storage};

use super::Session;

/// Summed amount for one breakdown group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Group label: a joined tag set or a single tag
    pub label: String,
    /// Sum of signed amounts; may mix income and expense
    pub total: Money,
    /// Number of entries in the group
    pub count: usize,
}

impl From<GroupTotal> for CategoryTotal {
    fn from(group: GroupTotal) -> Self {
        Self {
            label: group.key,
            total: group.total,
            count: group.count,
        }
    }
}

/// Column to sort category detail by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailSortKey {
    /// By magnitude, ignoring sign
    Amount,
    Description,
    #[default]
    Date,
}

impl DetailSortKey {
    /// Parse a sort key from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "amount" => Some(Self::Amount),
            "description" | "desc" => Some(Self::Description),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Sort order for category detail listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailSort {
    pub key: DetailSortKey,
    pub descending: bool,
}

impl DetailSort {
    /// Ascending sort on a key
    pub fn by(key: DetailSortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    /// Reverse the order
    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    /// Sort entries in place. Ties keep their storage order.
    pub fn apply(&self, entries: &mut [Transaction]) {
        entries.sort_by(|a, b| {
            let ord = match self.key {
                DetailSortKey::Amount => a.amount.abs().cmp(&b.amount.abs()),
                DetailSortKey::Description => a.description.cmp(&b.description),
                DetailSortKey::Date => a.date.cmp(&b.date).then(a.id.cmp(&b.id)),
            };
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}

/// Service for balance and category aggregation
pub struct AggregationService<'a> {
    storage: &'a Storage,
}

impl<'a> AggregationService<'a> {
    /// Create a new aggregation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Sum of all of the user's amounts. Zero when there are no entries.
    pub fn total_balance(&self, session: &Session) -> FinanceResult<Money> {
        self.storage.transactions.sum_for_user(session.user_id())
    }

    /// Per-category sums, ordered by label
    pub fn category_breakdown(
        &self,
        session: &Session,
        mode: BreakdownMode,
    ) -> FinanceResult<Vec<CategoryTotal>> {
        let groups = match mode {
            BreakdownMode::TagSet => self.storage.transactions.sum_by_label(session.user_id())?,
            BreakdownMode::PerTag => self.storage.transactions.sum_by_tag(session.user_id())?,
        };
        Ok(groups.into_iter().map(CategoryTotal::from).collect())
    }

    /// Entries whose tag set is exactly `categories`
    pub fn detail_by_category(
        &self,
        session: &Session,
        categories: &CategorySet,
        sort: DetailSort,
    ) -> FinanceResult<Vec<Transaction>> {
        let mut entries = self
            .storage
            .transactions
            .list_by_label(session.user_id(), categories)?;
        sort.apply(&mut entries);
        Ok(entries)
    }

    /// Entries carrying `tag`, alone or with other tags
    pub fn detail_by_tag(
        &self,
        session: &Session,
        tag: &str,
        sort: DetailSort,
    ) -> FinanceResult<Vec<Transaction>> {
        let mut entries = self.storage.transactions.list_by_tag(session.user_id(), tag)?;
        sort.apply(&mut entries);
        Ok(entries)
    }
}

/// Order groups largest magnitude first, then by label
pub(crate) fn by_magnitude(a: &CategoryTotal, b: &CategoryTotal) -> Ordering {
    b.total
        .abs()
        .cmp(&a.total.abs())
        .then_with(|| a.label.cmp(&b.label))
}
