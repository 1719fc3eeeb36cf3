//! Storage initialization
//!
//! Creates the schema on startup. Every statement is `IF NOT EXISTS`, so
//! running it against an existing database changes nothing.

use tracing::debug;

use crate::error::FinanceError;

use super::Database;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    amount INTEGER NOT NULL,
    description TEXT,
    category TEXT,
    date TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id)
);

CREATE TABLE IF NOT EXISTS transaction_tags (
    transaction_id INTEGER NOT NULL,
    tag TEXT NOT NULL,
    PRIMARY KEY (transaction_id, tag),
    FOREIGN KEY (transaction_id) REFERENCES transactions (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions (user_id, date);
CREATE INDEX IF NOT EXISTS idx_transaction_tags_tag ON transaction_tags (tag);
";

/// Create the users, transactions and tag tables if they are missing
pub fn initialize_storage(database: &Database) -> Result<(), FinanceError> {
    let conn = database.connect()?;
    conn.execute_batch(SCHEMA)?;
    debug!(path = %database.path().display(), "schema ready");
    Ok(())
}

/// Check if the database file still needs to be created
pub fn needs_initialization(database: &Database) -> bool {
    !database.path().exists()
}
