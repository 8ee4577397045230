//! Path resolution for rollcall configuration and data files.
//!
//! All rollcall data is stored in `~/.rollcall/`:
//! - `config.yaml` - Main configuration file
//! - `rollcall.db` - SQLite presence database
//! - `exports/` - Default destination for CSV exports

use std::path::PathBuf;

use crate::error::RollcallError;

/// Paths to rollcall configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.rollcall/`
    pub root: PathBuf,
    /// Config file: `~/.rollcall/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.rollcall/rollcall.db`
    pub database: PathBuf,
    /// Exports directory: `~/.rollcall/exports/`
    pub exports: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RollcallError> {
        let home = std::env::var("HOME").map_err(|_| {
            RollcallError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".rollcall")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("rollcall.db"),
            exports: root.join("exports"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), RollcallError> {
        for dir in [&self.root, &self.exports] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    RollcallError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".rollcall")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-rollcall");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("rollcall.db"));
        assert_eq!(paths.exports, root.join("exports"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.exports.exists());
    }
}
