//! Fixed-key storage mirror.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const UPSERT_MIRROR_SQL: &str = "INSERT INTO mirrors (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const SELECT_MIRROR_SQL: &str = "SELECT value FROM mirrors WHERE key = ?1";

impl super::Database {
    /// Stores `value` under `key`, replacing any previous value.
    pub fn put_mirror(&mut self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_MIRROR_SQL, params![key, value, Timestamp::now().to_string()])
            .db_context("Failed to write mirror")?;
        Ok(())
    }

    /// Last value stored under `key`.
    pub fn get_mirror(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_MIRROR_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read mirror")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::db::Database;

    #[test]
    fn test_last_write_wins() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut db = Database::new(temp_dir.path().join("test.db")).expect("open");

        assert_eq!(db.get_mirror("multiStepFormData").expect("read"), None);
        db.put_mirror("multiStepFormData", "{\"a\":\"1\"}").expect("write");
        db.put_mirror("multiStepFormData", "{\"a\":\"2\"}").expect("write");
        assert_eq!(
            db.get_mirror("multiStepFormData").expect("read").as_deref(),
            Some("{\"a\":\"2\"}")
        );
    }
}
