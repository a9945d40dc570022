//! Submission CRUD operations and queries.

use std::collections::BTreeMap;

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, FormError, Result},
    models::{FieldValue, Submission},
};

const INSERT_SUBMISSION_SQL: &str =
    "INSERT INTO submissions (form_id, data, total_steps, submitted_at) VALUES (?1, ?2, ?3, ?4)";
const SUBMISSION_COLUMNS: &str = "id, form_id, data, total_steps, submitted_at";
const DELETE_SUBMISSION_SQL: &str = "DELETE FROM submissions WHERE id = ?1";

impl super::Database {
    fn build_submission_from_row(row: &rusqlite::Row) -> rusqlite::Result<Submission> {
        let data_str: String = row.get(2)?;
        let data: BTreeMap<String, FieldValue> = serde_json::from_str(&data_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        Ok(Submission {
            id: row.get::<_, i64>(0)? as u64,
            form_id: row.get(1)?,
            data,
            total_steps: row.get::<_, i64>(3)? as usize,
            submitted_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Records a completed submission.
    pub fn insert_submission(
        &mut self,
        form_id: &str,
        data: &BTreeMap<String, FieldValue>,
        total_steps: usize,
        submitted_at: Timestamp,
    ) -> Result<Submission> {
        let payload = serde_json::to_string(data)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_SUBMISSION_SQL,
            params![form_id, payload, total_steps as i64, submitted_at.to_string()],
        )
        .db_context("Failed to insert submission")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Submission {
            id,
            form_id: form_id.to_string(),
            data: data.clone(),
            total_steps,
            submitted_at,
        })
    }

    /// Retrieves a submission by its ID.
    pub fn get_submission(&self, id: u64) -> Result<Option<Submission>> {
        let sql = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], Self::build_submission_from_row)
            .optional()
            .db_context("Failed to query submission")
    }

    /// Lists submissions, newest first, optionally restricted to one form.
    pub fn list_submissions(&self, form_id: Option<&str>) -> Result<Vec<Submission>> {
        let mut query = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions");
        if form_id.is_some() {
            query.push_str(" WHERE form_id = ?1");
        }
        query.push_str(" ORDER BY id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let rows = match form_id {
            Some(form_id) => stmt.query_map(params![form_id], Self::build_submission_from_row),
            None => stmt.query_map([], Self::build_submission_from_row),
        }
        .db_context("Failed to query submissions")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read submission rows")
    }

    /// Deletes a submission.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SubmissionNotFound` if no such record exists.
    pub fn delete_submission(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_SUBMISSION_SQL, params![id as i64])
            .db_context("Failed to delete submission")?;

        if deleted == 0 {
            return Err(FormError::SubmissionNotFound { id });
        }
        Ok(())
    }
}
