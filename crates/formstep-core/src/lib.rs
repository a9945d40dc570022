//! Core library for formstep, a multi-step form engine.
//!
//! A page is modeled as an element tree ([`dom::Document`]). The
//! [`StepRegistry`](registry::StepRegistry) discovers the steps of a form from
//! its marker attributes, and a [`FormSession`] drives them: it shows one step
//! at a time, captures field values into a [`FormDataStore`](store::FormDataStore),
//! evaluates skip conditions and answer-gated jumps, validates required
//! fields, mirrors values into summary cards and finally submits.
//!
//! Completed submissions can be persisted with a [`SubmissionStore`].
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Collection wrappers and session
//!   outcome formatting
//! - **Terminal Rendering**: Markdown output rendered by the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use formstep_core::{
//!     dom::{Document, ElementSpec, Selector},
//!     session::{Completion, NavOutcome},
//!     FormSession,
//! };
//!
//! let doc = Document::from_spec(
//!     ElementSpec::new("form")
//!         .attr("data-form", "multistep")
//!         .child(
//!             ElementSpec::new("div")
//!                 .attr("data-form", "step")
//!                 .child(ElementSpec::new("input").attr("name", "plan")),
//!         )
//!         .child(ElementSpec::new("div").attr("data-form", "step").attr("data-skip-if", "plan!=basic"))
//!         .child(ElementSpec::new("div").attr("data-form", "step")),
//! );
//! let mut session = FormSession::builder(doc).build()?;
//!
//! let plan = session
//!     .document()
//!     .query_first(session.form(), &Selector::attr_eq("name", "plan"))
//!     .expect("plan input");
//! session.input(plan, "basic");
//!
//! // The second step is skipped
//! assert!(session.go_next().is_moved());
//! assert_eq!(session.current_step(), 2);
//!
//! let outcome = session.go_next();
//! assert!(matches!(outcome, NavOutcome::Finished(Completion::Submitted(_))));
//! # Ok::<(), formstep_core::FormError>(())
//! ```

pub mod condition;
pub mod config;
pub mod countries;
pub mod db;
pub mod display;
pub mod dom;
pub mod enhancer;
pub mod error;
pub mod models;
pub mod params;
pub mod reader;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod submissions;
pub mod summary;

// Re-export commonly used types
pub use config::SessionConfig;
pub use db::Database;
pub use display::{OperationStatus, Steps, Submissions};
pub use error::{FormError, Result};
pub use models::{CompletionState, FieldValue, Step, Submission};
pub use params::{DeleteSubmission, FieldInput, FieldRef, GoTo, Id, ListSubmissions, Skip};
pub use session::{FormSession, NavOutcome, SessionBuilder};
pub use submissions::{SubmissionStore, SubmissionStoreBuilder};
