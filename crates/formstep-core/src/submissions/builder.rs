//! Builder for creating and configuring SubmissionStore instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::SubmissionStore;
use crate::{
    db::Database,
    error::{FormError, IoResultExt, Result},
};

/// Builder for creating and configuring SubmissionStore instances.
#[derive(Debug, Clone, Default)]
pub struct SubmissionStoreBuilder {
    database_path: Option<PathBuf>,
}

impl SubmissionStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/formstep/formstep.db` or
    /// `~/.local/share/formstep/formstep.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, creating the database and its parent directory.
    ///
    /// # Errors
    ///
    /// Returns `FormError::FileSystem` if the parent directory cannot be
    /// created and `FormError::Database` if initialization fails.
    pub async fn build(self) -> Result<SubmissionStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), FormError>(())
        })
        .await
        .map_err(|e| FormError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(SubmissionStore::new(db_path))
    }

    /// Default database path following the XDG Base Directory specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("formstep")
            .place_data_file("formstep.db")
            .map_err(|e| FormError::XdgDirectory(e.to_string()))
    }
}
