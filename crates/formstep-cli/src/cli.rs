//! Command definitions and handlers.
//!
//! Argument structures carry the clap derives and convert into the plain
//! parameter types of `formstep_core::params`, so the core stays free of CLI
//! concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Session / Store
//! ```

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use formstep_core::{
    display::{OperationStatus, Steps},
    dom::Document,
    params::{DeleteSubmission, Id, ListSubmissions},
    session::FormEvent,
    FormSession, SessionConfig, SubmissionStore,
};
use log::debug;

use crate::{
    renderer::TerminalRenderer,
    script::{self, Script},
};

/// Show the steps discovered in a form document
#[derive(Args)]
pub struct InspectArgs {
    /// JSON element tree of the page
    #[arg(help = "Path to the JSON element tree holding the form")]
    pub document: PathBuf,
    /// Id of the form to inspect when the page holds several
    #[arg(long, help = "Id of the form to inspect (first multi-step form by default)")]
    pub form: Option<String>,
}

/// Replay a scripted session against a form document
///
/// Every action of the script is applied in order and its navigation outcome
/// printed. Completed submissions are recorded in the submission store.
#[derive(Args)]
pub struct RunArgs {
    #[arg(help = "Path to the JSON element tree holding the form")]
    pub document: PathBuf,
    #[arg(help = "Path to the JSON list of scripted actions")]
    pub script: PathBuf,
    /// Session configuration
    #[arg(long, help = "Path to a JSON session configuration")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Id of the form to drive (first multi-step form by default)")]
    pub form: Option<String>,
}

/// List recorded submissions, newest first
#[derive(Args)]
pub struct ListSubmissionsArgs {
    /// Only list submissions of this form
    #[arg(long, help = "Only list submissions of this form")]
    pub form: Option<String>,
}

impl From<ListSubmissionsArgs> for ListSubmissions {
    fn from(val: ListSubmissionsArgs) -> Self {
        ListSubmissions { form_id: val.form }
    }
}

/// Show a recorded submission with all captured values
#[derive(Args)]
pub struct ShowSubmissionArgs {
    #[arg(help = "Unique identifier of the submission to show")]
    pub id: u64,
}

impl From<ShowSubmissionArgs> for Id {
    fn from(val: ShowSubmissionArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a recorded submission permanently
#[derive(Args)]
pub struct DeleteSubmissionArgs {
    #[arg(help = "Unique identifier of the submission to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteSubmissionArgs> for DeleteSubmission {
    fn from(val: DeleteSubmissionArgs) -> Self {
        DeleteSubmission {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// List recorded submissions
    #[command(aliases = ["l", "ls"])]
    List(ListSubmissionsArgs),
    /// Show a recorded submission
    #[command(alias = "s")]
    Show(ShowSubmissionArgs),
    /// Delete a recorded submission permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteSubmissionArgs),
}

/// Command handlers sharing the store and the renderer.
pub struct Cli {
    store: SubmissionStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: SubmissionStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub async fn handle_submission_command(&self, command: SubmissionCommands) -> Result<()> {
        match command {
            SubmissionCommands::List(args) => self.list_submissions(&args.into()).await,
            SubmissionCommands::Show(args) => self.show_submission(&args.into()).await,
            SubmissionCommands::Delete(args) => self.delete_submission(&args.into()).await,
        }
    }

    pub fn inspect(&self, args: InspectArgs) -> Result<()> {
        debug!("inspect: {}", args.document.display());

        let session = load_session(&args.document, None, args.form)?;
        let registry = session.registry();
        let mut out = format!("# Form {} ({} steps)\n\n", session.form_id(), registry.len());
        write!(out, "{}", Steps(registry.steps().to_vec()))?;
        if registry.final_step().is_some() {
            writeln!(out, "\nA final step is shown on completion.")?;
        }
        self.renderer.render(&out)
    }

    pub async fn run(&self, args: RunArgs) -> Result<()> {
        debug!(
            "run: {} with {}",
            args.document.display(),
            args.script.display()
        );

        let mut session = load_session(&args.document, args.config.as_deref(), args.form)?;
        let script = Script::from_path(&args.script)?;

        let mut out = format!(
            "# Session {} ({} steps)\n\n",
            session.form_id(),
            session.registry().len()
        );
        let mut submitted = Vec::new();

        for (i, action) in script.actions.iter().enumerate() {
            let outcomes = script::apply(&mut session, action)
                .with_context(|| format!("Action {} ({action}) failed", i + 1))?;

            writeln!(out, "## {}. {action}", i + 1)?;
            if outcomes.is_empty() {
                writeln!(out, "Value set")?;
            }
            for outcome in &outcomes {
                write!(out, "{outcome}")?;
            }
            writeln!(out)?;

            submitted.extend(session.take_events().into_iter().filter_map(|event| match event {
                FormEvent::Submitted(form) => Some(form),
                _ => None,
            }));
        }

        writeln!(out, "## Result")?;
        if session.is_inert() {
            writeln!(out, "Form has no steps")?;
        } else {
            writeln!(
                out,
                "Current step: {} of {}",
                session.current_step() + 1,
                session.registry().len()
            )?;
        }

        for form in &submitted {
            let record = self
                .store
                .record_submission(form)
                .await
                .context("Failed to record submission")?;
            let status = OperationStatus::success(format!("Recorded submission {}", record.id));
            write!(out, "{status}")?;
        }

        let config = session.config();
        if config.mirror_storage {
            if let Some(mirror) = session.storage().get(&config.mirror_key) {
                self.store
                    .put_mirror(&config.mirror_key, mirror)
                    .await
                    .context("Failed to store form data mirror")?;
                writeln!(out, "Mirrored form data under `{}`", config.mirror_key)?;
            }
        }

        self.renderer.render(&out)
    }

    pub async fn list_submissions(&self, params: &ListSubmissions) -> Result<()> {
        debug!("list_submissions: {params:?}");

        let submissions = self
            .store
            .list_submissions(params)
            .await
            .context("Failed to list submissions")?;

        let title = match &params.form_id {
            Some(form) => format!("Submissions of {form}"),
            None => "Submissions".to_string(),
        };
        self.renderer.render(&format!("# {title}\n\n{submissions}"))
    }

    async fn show_submission(&self, params: &Id) -> Result<()> {
        debug!("show_submission: {params:?}");

        let submission = self
            .store
            .get_submission(params)
            .await
            .context("Failed to get submission")?
            .ok_or_else(|| anyhow!("Submission with ID {} not found", params.id))?;

        self.renderer.render(&submission.to_string())
    }

    async fn delete_submission(&self, params: &DeleteSubmission) -> Result<()> {
        debug!("delete_submission: {params:?}");

        let deleted = self
            .store
            .delete_submission(params)
            .await
            .context("Failed to delete submission")?;

        let status = OperationStatus::success(format!(
            "Deleted submission {} of form {}",
            deleted.id, deleted.form_id
        ));
        self.renderer.render(&status.to_string())
    }
}

/// Loads the document and configuration and starts a session on the
/// requested form.
fn load_session(
    document: &Path,
    config: Option<&Path>,
    form: Option<String>,
) -> Result<FormSession> {
    let document = Document::from_path(document)
        .with_context(|| format!("Failed to load document {}", document.display()))?;
    let config = match config {
        Some(path) => SessionConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => SessionConfig::default(),
    };
    FormSession::builder(document)
        .with_form_id(form)
        .with_config(config)
        .build()
        .context("Failed to start form session")
}
