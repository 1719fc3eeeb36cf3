//! Storage layer for the finance tracker
//!
//! SQLite-backed repositories. A connection is opened for each operation and
//! dropped when it returns; nothing holds the database open between calls.

pub mod init;
pub mod transactions;
pub mod users;

pub use init::initialize_storage;
pub use transactions::{GroupTotal, TransactionRepository};
pub use users::UserRepository;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

/// Handle to the SQLite database file
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create a handle for the database at `path`. The file is created on
    /// first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with foreign key enforcement switched on
    pub fn connect(&self) -> Result<Connection, FinanceError> {
        debug!(path = %self.path.display(), "opening database");
        let conn = Connection::open(&self.path).map_err(|e| {
            FinanceError::Database(format!(
                "Failed to open {}: {}",
                self.path.display(),
                e
            ))
        })?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    database: Database,
    pub users: UserRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create storage under the configured paths and make sure the schema
    /// exists
    pub fn new(paths: &FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;
        Self::open(paths.database_file())
    }

    /// Open storage for a specific database file, creating the schema if
    /// needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FinanceError> {
        let database = Database::new(path);
        initialize_storage(&database)?;

        Ok(Self {
            users: UserRepository::new(database.clone()),
            transactions: TransactionRepository::new(database.clone()),
            database,
        })
    }

    /// Get the database handle
    pub fn database(&self) -> &Database {
        &self.database
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(paths.database_file().exists());
        assert_eq!(storage.database().path(), paths.database_file());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("fk.db"));
        let conn = db.connect().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Storage::open(temp_dir.path().join("missing").join("finance.db"));
        assert!(matches!(result, Err(FinanceError::Database(_))));
    }
}
