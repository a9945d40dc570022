//! Markdown formatting of steps, outcomes and submissions.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and session results get newtype wrappers or their own
//! implementations here. Everything renders as markdown so the CLI can pass
//! it through its terminal renderer unchanged.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Steps, Submissions)
//! - [`outcomes`]: Navigation outcomes, step changes and validation reports
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use formstep_core::display::OperationStatus;
//!
//! let deleted = OperationStatus::success("Deleted submission 3".to_string());
//! assert_eq!(deleted.to_string(), "Success: Deleted submission 3\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod outcomes;
pub mod status;

pub use collections::{Steps, Submissions};
pub use datetime::LocalDateTime;
pub use status::OperationStatus;
