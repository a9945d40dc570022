//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Step, Submission};

/// Newtype wrapper for displaying the discovered steps of a form.
///
/// ```rust
/// use formstep_core::{
///     display::Steps,
///     dom::{Document, ElementSpec},
///     registry::StepRegistry,
/// };
///
/// let mut doc = Document::from_spec(
///     ElementSpec::new("form").child(ElementSpec::new("div").attr("data-step", "1")),
/// );
/// let root = doc.root();
/// let registry = StepRegistry::discover(&mut doc, root);
/// let steps = Steps(registry.steps().to_vec());
/// assert!(steps.to_string().contains("### 1. step-1"));
/// ```
pub struct Steps(pub Vec<Step>);

impl Steps {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                write!(f, "{step}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying submission listings.
///
/// Listings are compact: one line per submission, newest first.
pub struct Submissions(pub Vec<Submission>);

impl Submissions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Submission> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Submission> {
        self.0.iter()
    }
}

impl Index<usize> for Submissions {
    type Output = Submission;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Submissions {
    type Item = Submission;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Submissions {
    type Item = &'a Submission;
    type IntoIter = std::slice::Iter<'a, Submission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Submissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No submissions found.");
        }
        for submission in &self.0 {
            writeln!(
                f,
                "- **{}**. {} ({} values, {} steps) {}",
                submission.id,
                submission.form_id,
                submission.filled_count(),
                submission.total_steps,
                super::LocalDateTime(&submission.submitted_at)
            )?;
        }
        Ok(())
    }
}
