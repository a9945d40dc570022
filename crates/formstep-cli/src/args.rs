use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{InspectArgs, RunArgs, SubmissionCommands};

/// Replay and inspect multi-step forms
///
/// Formstep drives the step navigation of multi-step forms described as JSON
/// element trees: it discovers the steps, replays scripted user sessions
/// through the navigator and keeps a local record of completed submissions.
#[derive(Parser)]
#[command(version, about, name = "formstep")]
pub struct Args {
    /// Path to the SQLite submission store. Defaults to
    /// $XDG_DATA_HOME/formstep/formstep.db
    #[arg(long, global = true)]
    pub store_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the formstep CLI
///
/// - `inspect`: Show the steps discovered in a form document
/// - `run`: Replay a scripted session against a form document
/// - `submissions`: Browse and delete recorded submissions
#[derive(Subcommand)]
pub enum Commands {
    /// Show the steps discovered in a form document
    #[command(alias = "i")]
    Inspect(InspectArgs),
    /// Replay a scripted session against a form document
    #[command(alias = "r")]
    Run(RunArgs),
    /// Manage recorded submissions
    #[command(alias = "s")]
    Submissions {
        #[command(subcommand)]
        command: SubmissionCommands,
    },
}
