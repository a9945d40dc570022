//! Formstep CLI Application
//!
//! Command-line interface for inspecting multi-step forms, replaying scripted
//! sessions and browsing recorded submissions.

mod args;
mod cli;
mod renderer;
mod script;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use formstep_core::{params::ListSubmissions, SubmissionStoreBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        store_file,
        no_color,
        command,
    } = Args::parse();

    let store = SubmissionStoreBuilder::new()
        .with_database_path(store_file)
        .build()
        .await
        .context("Failed to initialize submission store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Formstep started");

    let cli = Cli::new(store, renderer);
    match command {
        Some(Inspect(args)) => cli.inspect(args),
        Some(Run(args)) => cli.run(args).await,
        Some(Submissions { command }) => cli.handle_submission_command(command).await,
        None => cli.list_submissions(&ListSubmissions::default()).await,
    }
}
