//! Async store of completed submissions.
//!
//! [`SubmissionStore`] wraps the synchronous [`crate::db::Database`] and runs
//! every operation on tokio's blocking pool, opening a fresh connection per
//! call.
//!
//! ```rust,no_run
//! use formstep_core::{params::ListSubmissions, SubmissionStoreBuilder};
//!
//! # async fn example() -> Result<(), formstep_core::FormError> {
//! let store = SubmissionStoreBuilder::new()
//!     .with_database_path(Some("/tmp/formstep.db"))
//!     .build()
//!     .await?;
//! let recent = store.list_submissions(&ListSubmissions::default()).await?;
//! println!("{} submissions", recent.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use log::info;
use tokio::task;

use crate::{
    db::Database,
    display::Submissions,
    error::{FormError, Result},
    models::Submission,
    params::{DeleteSubmission, Id, ListSubmissions},
    session::SubmittedForm,
};

pub mod builder;


pub use builder::SubmissionStoreBuilder;

/// Persistent record of submissions and storage mirrors.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    pub(crate) db_path: PathBuf,
}

fn join_error(e: task::JoinError) -> FormError {
    FormError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

impl SubmissionStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Records a completed submission.
    pub async fn record_submission(&self, submitted: &SubmittedForm) -> Result<Submission> {
        let db_path = self.db_path.clone();
        let form_id = submitted.form_id.clone();
        let data = submitted.data.clone();
        let total_steps = submitted.total_steps;
        let submitted_at = submitted.submitted_at;

        let submission = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_submission(&form_id, &data, total_steps, submitted_at)
        })
        .await
        .map_err(join_error)??;

        info!(
            "Recorded submission {} for form {}",
            submission.id, submission.form_id
        );
        Ok(submission)
    }

    /// Retrieves a submission by its ID.
    pub async fn get_submission(&self, params: &Id) -> Result<Option<Submission>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_submission(id)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists submissions, newest first.
    pub async fn list_submissions(&self, params: &ListSubmissions) -> Result<Submissions> {
        let db_path = self.db_path.clone();
        let form_id = params.form_id.clone();

        let submissions = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_submissions(form_id.as_deref())
        })
        .await
        .map_err(join_error)??;

        Ok(Submissions(submissions))
    }

    /// Deletes a submission and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` if `confirmed` is false and
    /// `FormError::SubmissionNotFound` if no such record exists.
    pub async fn delete_submission(&self, params: &DeleteSubmission) -> Result<Submission> {
        if !params.confirmed {
            return Err(FormError::invalid_input("confirmed").with_reason(
                "Submission deletion requires explicit confirmation. Set 'confirmed' to true to proceed.",
            ));
        }
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let submission = db
                .get_submission(id)?
                .ok_or(FormError::SubmissionNotFound { id })?;
            db.delete_submission(id)?;
            Ok(submission)
        })
        .await
        .map_err(join_error)?
    }

    /// Stores the mirror value under `key`, replacing the previous one.
    pub async fn put_mirror(&self, key: &str, value: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        let value = value.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_mirror(&key, &value)
        })
        .await
        .map_err(join_error)?
    }

    /// Last mirror value stored under `key`.
    pub async fn get_mirror(&self, key: &str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_mirror(&key)
        })
        .await
        .map_err(join_error)?
    }
}
