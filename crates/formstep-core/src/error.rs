//! Error types for the formstep library.
//!
//! Navigation itself never fails: it reports tagged outcomes (see
//! [`crate::session::NavOutcome`]). The errors below cover the fallible edges
//! of the library: loading documents and configuration, and persisting
//! submissions.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all fallible formstep operations.
#[derive(Error, Debug)]
pub enum FormError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Submission not found for the given ID
    #[error("Submission with ID {id} not found")]
    SubmissionNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The element tree could not be used as a form document
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> FormError {
        FormError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> FormError {
        FormError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl FormError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an invalid document error.
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        FormError::InvalidDocument {
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FormError::database(message).with_source(e))
    }
}

/// Extension trait attaching a path to I/O failures.
pub trait IoResultExt<T> {
    /// Map I/O errors to [`FormError::FileSystem`] for `path`.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| FormError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Result type alias for formstep operations
pub type Result<T> = std::result::Result<T, FormError>;
