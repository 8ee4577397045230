//! `SQLite` database connection and lifecycle.
//!
//! The database is stored at `~/.rollcall/rollcall.db` by default and holds
//! the `members` presence table.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::RollcallError;

use super::migrations;

/// Database connection wrapper.
///
/// The connection sits behind a mutex so one `Database` can be shared across
/// threads; every statement runs while holding the lock.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, RollcallError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary. Safe to
    /// call on every startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, RollcallError> {
        let conn = Connection::open(path).map_err(|e| {
            RollcallError::StorageUnavailable(format!(
                "Failed to open database {}: {e}",
                path.display()
            ))
        })?;

        Self::initialize(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, RollcallError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            RollcallError::StorageUnavailable(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, RollcallError> {
        // Concurrent writers from other processes wait instead of failing
        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(|e| {
                RollcallError::StorageUnavailable(format!("Failed to set busy timeout: {e}"))
            })?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Close the database, flushing the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` refuses to close the connection.
    pub fn close(self) -> Result<(), RollcallError> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| RollcallError::StorageUnavailable("Connection lock poisoned".into()))?;

        conn.close().map_err(|(_, e)| {
            RollcallError::StorageUnavailable(format!("Failed to close database: {e}"))
        })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, RollcallError> {
        self.with_connection(migrations::get_version)
    }

    /// Run `f` against the underlying connection while holding the lock.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the lock is poisoned, otherwise
    /// whatever `f` returns.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, RollcallError>,
    ) -> Result<T, RollcallError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| RollcallError::StorageUnavailable("Connection lock poisoned".into()))?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
        db.close().unwrap();
    }

    #[test]
    fn test_reopen_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        let first = db.schema_version().unwrap();
        db.close().unwrap();

        // Reopen - migrations are already applied
        let db = Database::open_at(&db_path).unwrap();
        assert_eq!(db.schema_version().unwrap(), first);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing").join("test.db");

        let err = Database::open_at(&db_path).err().unwrap();
        assert!(err.is_storage());
    }
}
