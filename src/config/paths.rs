//! Path resolution for tend configuration and data files.
//!
//! All tend data is stored in `~/.tend/`:
//! - `config.yaml` - Main configuration file
//! - `tend.db` - SQLite task database
//!
//! The root can be moved with `--home` or `TEND_HOME`.

use std::path::PathBuf;

use crate::error::TendError;

/// Paths to tend configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.tend/`
    pub root: PathBuf,
    /// Config file: `~/.tend/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.tend/tend.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TendError> {
        let home = std::env::var("HOME")
            .map_err(|_| TendError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".tend")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("tend.db"),
            root,
        }
    }

    /// Resolve paths from an explicit root, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, TendError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TendError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                TendError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
