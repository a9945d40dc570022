//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Brings databases created by earlier versions up to date.
    fn apply_migrations(&self) -> Result<()> {
        // Early stores recorded submissions without the step count
        let has_total_steps: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('submissions') WHERE name = 'total_steps'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect submissions table")?;

        if !has_total_steps {
            self.connection
                .execute(
                    "ALTER TABLE submissions ADD COLUMN total_steps INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add total_steps column to submissions table")?;
        }

        Ok(())
    }
}
