//! User repository
//!
//! Rows of the `users` table. The username column carries the uniqueness
//! constraint; a violation comes back as `DuplicateUsername`.

use rusqlite::{params, ErrorCode, OptionalExtension};

use crate::error::FinanceError;
use crate::models::{User, UserId};

use super::Database;

/// Repository for user persistence
pub struct UserRepository {
    database: Database,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Insert a user with an already-hashed password
    pub fn insert(&self, username: &str, password_hash: &str) -> Result<UserId, FinanceError> {
        let conn = self.database.connect()?;
        match conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, password_hash],
        ) {
            Ok(_) => Ok(UserId::from_raw(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(FinanceError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a user by exact (case-sensitive) username
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, FinanceError> {
        let conn = self.database.connect()?;
        let user = conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                [username],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, FinanceError> {
        let conn = self.database.connect()?;
        let user = conn
            .query_row(
                "SELECT id, username, password FROM users WHERE id = ?1",
                [id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Count users
    pub fn count(&self) -> Result<usize, FinanceError> {
        let conn = self.database.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
