//! SQLite persistence for completed submissions and storage mirrors.
//!
//! Low-level, synchronous access. Async callers go through
//! [`crate::submissions::SubmissionStore`], which runs these operations on
//! the blocking pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod mirror_queries;
pub mod submission_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
