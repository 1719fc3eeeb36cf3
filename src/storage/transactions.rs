//! Transaction repository
//!
//! Rows of the `transactions` table and their tags in `transaction_tags`.
//! The `category` column holds the canonical joined label of the tag set,
//! which is what exact-set grouping and lookups key on; per-tag queries go
//! through the junction table.

use std::collections::HashMap;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::FinanceError;
use crate::models::transaction::{format_timestamp, parse_timestamp};
use crate::models::{CategorySet, Money, Transaction, TransactionId, UserId};

use super::Database;

/// A summed group: a label (tag set or single tag), its total and row count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    pub key: String,
    pub total: Money,
    pub count: usize,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    database: Database,
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, amount, description, category, date FROM transactions";

/// Columns as read, before tags are attached
struct TransactionRow {
    id: TransactionId,
    user_id: UserId,
    amount: Money,
    description: String,
    label: String,
    date: DateTime<Utc>,
}

impl TransactionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let date: String = row.get(5)?;
        let date = parse_timestamp(&date).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            label: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            date,
        })
    }

    fn into_transaction(self, tags: Option<Vec<String>>) -> Transaction {
        // Rows written outside this crate may lack tag rows; fall back to the label
        let categories = match tags {
            Some(tags) => CategorySet::from_tags(tags),
            None => CategorySet::parse_label(&self.label),
        };
        Transaction {
            id: self.id,
            user_id: self.user_id,
            amount: self.amount,
            description: self.description,
            categories,
            date: self.date,
        }
    }
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Insert a transaction and its tags
    pub fn insert(
        &self,
        user_id: UserId,
        amount: Money,
        description: &str,
        categories: &CategorySet,
        date: DateTime<Utc>,
    ) -> Result<Transaction, FinanceError> {
        // Stored timestamps carry microseconds; keep the returned value equal
        // to what a later read produces
        let date = ceil_to_micros(date);

        let mut conn = self.database.connect()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO transactions (user_id, amount, description, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                amount,
                description,
                categories.label(),
                format_timestamp(&date)
            ],
        )?;
        let id = TransactionId::from_raw(tx.last_insert_rowid());

        {
            let mut stmt =
                tx.prepare("INSERT INTO transaction_tags (transaction_id, tag) VALUES (?1, ?2)")?;
            for tag in categories.iter() {
                stmt.execute(params![id, tag])?;
            }
        }

        tx.commit()?;

        Ok(Transaction {
            id,
            user_id,
            amount,
            description: description.to_string(),
            categories: categories.clone(),
            date,
        })
    }

    /// Get one of a user's transactions by ID
    pub fn get(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, FinanceError> {
        let conn = self.database.connect()?;
        let row = conn
            .query_row(
                &format!("{} WHERE user_id = ?1 AND id = ?2", SELECT_COLUMNS),
                params![user_id, id],
                TransactionRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => {
                let own = load_tags_for(&conn, row.id)?;
                Ok(Some(row.into_transaction(own)))
            }
            None => Ok(None),
        }
    }

    /// All of a user's transactions, most recent first
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Transaction>, FinanceError> {
        self.query(
            &format!(
                "{} WHERE user_id = ?1 ORDER BY date DESC, id DESC",
                SELECT_COLUMNS
            ),
            user_id,
            None,
        )
    }

    /// A user's transactions whose tag set is exactly `categories`
    pub fn list_by_label(
        &self,
        user_id: UserId,
        categories: &CategorySet,
    ) -> Result<Vec<Transaction>, FinanceError> {
        self.query(
            &format!(
                "{} WHERE user_id = ?1 AND category = ?2 ORDER BY date DESC, id DESC",
                SELECT_COLUMNS
            ),
            user_id,
            Some(categories.label().as_str()),
        )
    }

    /// A user's transactions tagged with `tag`, among possibly others
    pub fn list_by_tag(&self, user_id: UserId, tag: &str) -> Result<Vec<Transaction>, FinanceError> {
        self.query(
            &format!(
                "{} WHERE user_id = ?1 AND id IN
                     (SELECT transaction_id FROM transaction_tags WHERE tag = ?2)
                 ORDER BY date DESC, id DESC",
                SELECT_COLUMNS
            ),
            user_id,
            Some(tag.trim()),
        )
    }

    fn query(
        &self,
        sql: &str,
        user_id: UserId,
        filter: Option<&str>,
    ) -> Result<Vec<Transaction>, FinanceError> {
        let conn = self.database.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = match filter {
            Some(filter) => stmt
                .query_map(params![user_id, filter], TransactionRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map(params![user_id], TransactionRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut tags = load_tags(&conn, user_id)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let own = tags.remove(&row.id);
                row.into_transaction(own)
            })
            .collect())
    }

    /// Delete one of a user's transactions. Returns whether a row was removed.
    pub fn delete(&self, user_id: UserId, id: TransactionId) -> Result<bool, FinanceError> {
        let conn = self.database.connect()?;
        let removed = conn.execute(
            "DELETE FROM transactions WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
        )?;
        Ok(removed > 0)
    }

    /// Delete every row of the user matching all of the given values
    pub fn delete_matching(
        &self,
        user_id: UserId,
        amount: Money,
        description: &str,
        categories: &CategorySet,
        date: DateTime<Utc>,
    ) -> Result<usize, FinanceError> {
        let conn = self.database.connect()?;
        let removed = conn.execute(
            "DELETE FROM transactions
             WHERE user_id = ?1 AND amount = ?2 AND description = ?3 AND category = ?4 AND date = ?5",
            params![
                user_id,
                amount,
                description,
                categories.label(),
                format_timestamp(&date)
            ],
        )?;
        Ok(removed)
    }

    /// Sum of a user's amounts; zero when there are none
    pub fn sum_for_user(&self, user_id: UserId) -> Result<Money, FinanceError> {
        let conn = self.database.connect()?;
        let total = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Sums grouped by exact tag set
    pub fn sum_by_label(&self, user_id: UserId) -> Result<Vec<GroupTotal>, FinanceError> {
        self.grouped(
            "SELECT COALESCE(category, ''), SUM(amount), COUNT(*) FROM transactions
             WHERE user_id = ?1
             GROUP BY category
             ORDER BY category",
            user_id,
        )
    }

    /// Sums grouped by individual tag. An entry with several tags counts
    /// toward each of them.
    pub fn sum_by_tag(&self, user_id: UserId) -> Result<Vec<GroupTotal>, FinanceError> {
        self.grouped(
            "SELECT tt.tag, SUM(t.amount), COUNT(*) FROM transactions t
             JOIN transaction_tags tt ON tt.transaction_id = t.id
             WHERE t.user_id = ?1
             GROUP BY tt.tag
             ORDER BY tt.tag",
            user_id,
        )
    }

    fn grouped(&self, sql: &str, user_id: UserId) -> Result<Vec<GroupTotal>, FinanceError> {
        let conn = self.database.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let groups = stmt
            .query_map([user_id], |row| {
                Ok(GroupTotal {
                    key: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    /// Count a user's transactions
    pub fn count(&self, user_id: UserId) -> Result<usize, FinanceError> {
        let conn = self.database.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// All tag rows for a user's transactions, keyed by transaction
/// Round up to whole microseconds, never earlier than `date`
fn ceil_to_micros(date: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = date.trunc_subsecs(6);
    if truncated < date {
        truncated + Duration::microseconds(1)
    } else {
        truncated
    }
}

/// Tags of a single transaction; `None` when it has no tag rows
fn load_tags_for(
    conn: &Connection,
    id: TransactionId,
) -> Result<Option<Vec<String>>, FinanceError> {
    let mut stmt = conn.prepare("SELECT tag FROM transaction_tags WHERE transaction_id = ?1")?;
    let tags = stmt
        .query_map([id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if tags.is_empty() { None } else { Some(tags) })
}

fn load_tags(
    conn: &Connection,
    user_id: UserId,
) -> Result<HashMap<TransactionId, Vec<String>>, FinanceError> {
    let mut stmt = conn.prepare(
        "SELECT tt.transaction_id, tt.tag FROM transaction_tags tt
         JOIN transactions t ON t.id = tt.transaction_id
         WHERE t.user_id = ?1",
    )?;
    let mut tags: HashMap<TransactionId, Vec<String>> = HashMap::new();
    let rows = stmt.query_map([user_id], |row| {
        Ok((row.get::<_, TransactionId>(0)?, row.get::<_, String>(1)?))
    })?;
    for row in rows {
        let (id, tag) = row?;
        tags.entry(id).or_default().push(tag);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{initialize_storage, UserRepository};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let database = Database::new(temp_dir.path().join("finance.db"));
        initialize_storage(&database).unwrap();
        let user = UserRepository::new(database.clone())
            .insert("testuser", "hash")
            .unwrap();
        (temp_dir, TransactionRepository::new(database), user)
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 12, 0, 0).unwrap()
    }

    fn tags(label: &str) -> CategorySet {
        CategorySet::parse_label(label)
    }

    #[test]
    fn test_empty_user() {
        let (_temp_dir, repo, user) = create_test_repo();
        assert_eq!(repo.count(user).unwrap(), 0);
        assert!(repo.list_for_user(user).unwrap().is_empty());
        assert_eq!(repo.sum_for_user(user).unwrap(), Money::zero());
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo, user) = create_test_repo();

        let txn = repo
            .insert(user, Money::from_cents(-5000), "Rent", &tags("Bills"), day(15))
            .unwrap();

        let retrieved = repo.get(user, txn.id).unwrap().unwrap();
        assert_eq!(retrieved, txn);
        assert_eq!(retrieved.categories.label(), "Bills");
    }

    #[test]
    fn test_stored_date_never_before_given_date() {
        let (_temp_dir, repo, user) = create_test_repo();
        let given = day(15) + Duration::nanoseconds(1_500);

        let txn = repo
            .insert(user, Money::from_cents(1), "a", &tags("Pay"), given)
            .unwrap();
        assert!(txn.date >= given);
        assert_eq!(txn.date, day(15) + Duration::microseconds(2));
        assert_eq!(repo.get(user, txn.id).unwrap().unwrap().date, txn.date);

        let exact = day(16) + Duration::microseconds(7);
        let txn = repo
            .insert(user, Money::from_cents(1), "b", &tags("Pay"), exact)
            .unwrap();
        assert_eq!(txn.date, exact);
    }

    #[test]
    fn test_get_reads_only_its_own_tags() {
        let (_temp_dir, repo, user) = create_test_repo();
        repo.insert(user, Money::from_cents(1), "a", &tags("Travel"), day(1)).unwrap();
        let txn = repo
            .insert(user, Money::from_cents(2), "b", &tags("Bills, Groceries"), day(2))
            .unwrap();

        let retrieved = repo.get(user, txn.id).unwrap().unwrap();
        assert_eq!(retrieved.categories.label(), "Bills, Groceries");
    }

    #[test]
    fn test_list_is_most_recent_first() {
        let (_temp_dir, repo, user) = create_test_repo();

        repo.insert(user, Money::from_cents(100), "a", &tags("Pay"), day(10)).unwrap();
        repo.insert(user, Money::from_cents(200), "b", &tags("Pay"), day(20)).unwrap();
        repo.insert(user, Money::from_cents(300), "c", &tags("Pay"), day(15)).unwrap();

        let listed: Vec<_> = repo
            .list_for_user(user)
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(listed, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_same_timestamp_newest_insert_first() {
        let (_temp_dir, repo, user) = create_test_repo();

        repo.insert(user, Money::from_cents(1), "first", &tags("Pay"), day(1)).unwrap();
        repo.insert(user, Money::from_cents(2), "second", &tags("Pay"), day(1)).unwrap();

        let listed = repo.list_for_user(user).unwrap();
        assert_eq!(listed[0].description, "second");
    }

    #[test]
    fn test_multi_tag_entry_round_trips() {
        let (_temp_dir, repo, user) = create_test_repo();

        let txn = repo
            .insert(user, Money::from_cents(-900), "Flight", &tags("Travel, Bills"), day(3))
            .unwrap();
        let listed = repo.list_for_user(user).unwrap();

        assert_eq!(listed[0].id, txn.id);
        assert!(listed[0].categories.contains("Bills"));
        assert!(listed[0].categories.contains("Travel"));
    }

    #[test]
    fn test_delete_scoped_to_user() {
        let (temp_dir, repo, user) = create_test_repo();
        let other = UserRepository::new(Database::new(temp_dir.path().join("finance.db")))
            .insert("other", "hash")
            .unwrap();

        let txn = repo
            .insert(user, Money::from_cents(100), "a", &tags("Pay"), day(1))
            .unwrap();

        assert!(!repo.delete(other, txn.id).unwrap());
        assert_eq!(repo.count(user).unwrap(), 1);

        assert!(repo.delete(user, txn.id).unwrap());
        assert_eq!(repo.count(user).unwrap(), 0);
        assert!(!repo.delete(user, txn.id).unwrap());
    }

    #[test]
    fn test_delete_cascades_to_tags() {
        let (temp_dir, repo, user) = create_test_repo();
        let txn = repo
            .insert(user, Money::from_cents(100), "a", &tags("Pay, Bonus"), day(1))
            .unwrap();
        repo.delete(user, txn.id).unwrap();

        let conn = Database::new(temp_dir.path().join("finance.db"))
            .connect()
            .unwrap();
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM transaction_tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_delete_matching_removes_all_identical_rows() {
        let (_temp_dir, repo, user) = create_test_repo();
        let date = day(5);

        repo.insert(user, Money::from_cents(100), "dup", &tags("Pay"), date).unwrap();
        repo.insert(user, Money::from_cents(100), "dup", &tags("Pay"), date).unwrap();
        repo.insert(user, Money::from_cents(100), "dup", &tags("Pay"), date + Duration::seconds(1))
            .unwrap();

        let removed = repo
            .delete_matching(user, Money::from_cents(100), "dup", &tags("Pay"), date)
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.count(user).unwrap(), 1);
    }

    #[test]
    fn test_sum_by_label_and_tag() {
        let (_temp_dir, repo, user) = create_test_repo();

        repo.insert(user, Money::from_cents(-1000), "a", &tags("Bills, Travel"), day(1)).unwrap();
        repo.insert(user, Money::from_cents(-500), "b", &tags("Travel, Bills"), day(2)).unwrap();
        repo.insert(user, Money::from_cents(-200), "c", &tags("Travel"), day(3)).unwrap();

        let by_label = repo.sum_by_label(user).unwrap();
        assert_eq!(
            by_label,
            vec![
                GroupTotal { key: "Bills, Travel".into(), total: Money::from_cents(-1500), count: 2 },
                GroupTotal { key: "Travel".into(), total: Money::from_cents(-200), count: 1 },
            ]
        );

        let by_tag = repo.sum_by_tag(user).unwrap();
        assert_eq!(
            by_tag,
            vec![
                GroupTotal { key: "Bills".into(), total: Money::from_cents(-1500), count: 2 },
                GroupTotal { key: "Travel".into(), total: Money::from_cents(-1700), count: 3 },
            ]
        );
    }

    #[test]
    fn test_list_by_label_and_tag() {
        let (_temp_dir, repo, user) = create_test_repo();

        repo.insert(user, Money::from_cents(-1000), "a", &tags("Bills, Travel"), day(1)).unwrap();
        repo.insert(user, Money::from_cents(-200), "c", &tags("Travel"), day(3)).unwrap();

        assert_eq!(repo.list_by_label(user, &tags("Travel")).unwrap().len(), 1);
        assert_eq!(repo.list_by_label(user, &tags("Travel, Bills")).unwrap().len(), 1);
        assert_eq!(repo.list_by_tag(user, "Travel").unwrap().len(), 2);
        assert!(repo.list_by_tag(user, "Groceries").unwrap().is_empty());
    }

    #[test]
    fn test_row_without_tags_falls_back_to_label() {
        let (temp_dir, repo, user) = create_test_repo();
        let conn = Database::new(temp_dir.path().join("finance.db"))
            .connect()
            .unwrap();
        conn.execute(
            "INSERT INTO transactions (user_id, amount, description, category, date)
             VALUES (?1, 100, 'legacy', 'Pay, Bonus', ?2)",
            params![user, format_timestamp(&day(1))],
        )
        .unwrap();

        let listed = repo.list_for_user(user).unwrap();
        assert_eq!(listed[0].categories, tags("Bonus, Pay"));
    }
}
