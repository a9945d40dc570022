//! Per-form session: the navigation state machine and everything it drives.
//!
//! A [`FormSession`] owns its document, step registry, navigation state,
//! data store, configuration and scheduler. Sessions share nothing, so
//! several forms can be driven independently and dropped cleanly.
//!
//! Host events map onto methods: clicks go through [`FormSession::click`],
//! typing through [`FormSession::input`], value changes through
//! [`FormSession::change`], and the passage of time through
//! [`FormSession::advance_time`]. Navigation operations never fail; they
//! return a tagged [`NavOutcome`].
//!
//! ```rust
//! use formstep_core::{
//!     dom::{Document, ElementSpec},
//!     session::FormSession,
//! };
//!
//! let doc = Document::from_spec(
//!     ElementSpec::new("form")
//!         .attr("data-form", "multistep")
//!         .child(ElementSpec::new("div").attr("data-form", "step"))
//!         .child(ElementSpec::new("div").attr("data-form", "step")),
//! );
//! let mut session = FormSession::builder(doc).build()?;
//! assert!(session.go_next().is_moved());
//! assert_eq!(session.current_step(), 1);
//! # Ok::<(), formstep_core::FormError>(())
//! ```

use std::collections::{BTreeMap, HashMap};

use log::info;
use serde::Serialize;

use crate::{
    config::SessionConfig,
    dom::{Document, NodeId, Selector},
    enhancer::FieldEnhancer,
    error::{FormError, Result},
    reader::FieldValueReader,
    registry::StepRegistry,
    scheduler::Scheduler,
    store::FormDataStore,
    summary::{NoPhoneService, PhoneFormatter, SummaryProjector},
};

pub mod dispatch;
pub mod events;
pub mod navigation;
pub mod progress;
pub mod submit;
pub mod validation;
pub mod wrappers;


pub use events::{Completion, FormEvent, NavOutcome, SkipReason, StepChange, SubmittedForm};
pub use progress::{IndicatorState, Progress};
pub use validation::{FailedField, ValidationReport};

/// Markers of multi-step forms, in lookup order.
pub fn form_selector() -> Selector {
    Selector::any([
        Selector::attr_eq("data-form", "multistep"),
        Selector::attr("data-multi-step"),
        Selector::attr("data-formly"),
        Selector::attr("data-step-form"),
        Selector::class("multi-step-form"),
    ])
}

/// Current step pointer and back-navigation history.
///
/// `current` is always a valid step index and `history` never contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    current: usize,
    history: Vec<usize>,
}

impl NavigationState {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Moves to `target`. Entries at and above an earlier visit of `target`
    /// are discarded; the old index is pushed only for forward moves that
    /// record history.
    fn move_to(&mut self, target: usize, record: bool) {
        if let Some(pos) = self.history.iter().position(|i| *i == target) {
            self.history.truncate(pos);
        }
        if record && target > self.current {
            self.history.push(self.current);
        }
        self.current = target;
    }

    fn pop(&mut self) -> Option<usize> {
        self.history.pop()
    }
}

/// Deferred work run when the scheduler clock reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Deferred {
    /// Debounced store write of a typed value
    SaveField(NodeId),
    /// Answer-gated jump after a matching change
    AnswerJump(NodeId),
    /// Removal of a rendered error summary
    DismissErrors(NodeId),
    /// Focus request once a transition settled
    Focus(NodeId),
}

/// Builder for [`FormSession`].
#[derive(Debug)]
pub struct SessionBuilder {
    document: Document,
    form_id: Option<String>,
    config: SessionConfig,
    formatter: Option<Box<dyn PhoneFormatter>>,
}

impl SessionBuilder {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            form_id: None,
            config: SessionConfig::default(),
            formatter: None,
        }
    }

    /// Selects the form by `id` or `data-form-id`. Without it the first
    /// multi-step form is used, then the first `form`, then the root.
    pub fn with_form_id(mut self, form_id: Option<impl Into<String>>) -> Self {
        self.form_id = form_id.map(Into::into);
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a locale-aware phone formatter for summaries.
    pub fn with_phone_formatter(mut self, formatter: Box<dyn PhoneFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Discovers the steps and shows the first one.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidDocument` if a form id was requested and no
    /// such form exists.
    pub fn build(self) -> Result<FormSession> {
        let mut document = self.document;
        let form = Self::locate_form(&document, self.form_id.as_deref())?;
        let form_id = self
            .form_id
            .or_else(|| document.attr(form, "id").map(String::from))
            .or_else(|| document.attr(form, "data-form-id").map(String::from))
            .unwrap_or_else(|| format!("form-{}", form.0));
        document.set_attr(form, "data-form-id", form_id.clone());

        let registry = StepRegistry::discover(&mut document, form);
        let enhancer = FieldEnhancer;
        enhancer.attach(&mut document, form);

        let projector = SummaryProjector::new(
            self.config.summary_empty.clone(),
            self.formatter.unwrap_or_else(|| Box::new(NoPhoneService)),
        );

        let mut session = FormSession {
            document,
            form,
            form_id,
            registry,
            state: NavigationState::default(),
            store: FormDataStore::new(),
            config: self.config,
            scheduler: Scheduler::new(),
            projector,
            enhancer,
            events: Vec::new(),
            last_clicks: HashMap::new(),
            storage: BTreeMap::new(),
        };
        session.initialize();
        Ok(session)
    }

    fn locate_form(document: &Document, form_id: Option<&str>) -> Result<NodeId> {
        let root = document.root();
        if let Some(id) = form_id {
            let by_id = Selector::any([
                Selector::attr_eq("id", id),
                Selector::attr_eq("data-form-id", id),
            ]);
            if by_id.matches(document, root) {
                return Ok(root);
            }
            return document
                .query_first(root, &by_id)
                .ok_or_else(|| FormError::invalid_document(format!("no form with id '{id}'")));
        }
        let markers = form_selector();
        if markers.matches(document, root) {
            return Ok(root);
        }
        Ok(document
            .query_first(root, &markers)
            .or_else(|| document.query_first(root, &Selector::tag("form")))
            .unwrap_or(root))
    }
}

/// State machine of one multi-step form.
#[derive(Debug)]
pub struct FormSession {
    document: Document,
    form: NodeId,
    form_id: String,
    registry: StepRegistry,
    state: NavigationState,
    store: FormDataStore,
    config: SessionConfig,
    scheduler: Scheduler<Deferred>,
    projector: SummaryProjector,
    enhancer: FieldEnhancer,
    events: Vec<FormEvent>,
    last_clicks: HashMap<NodeId, u64>,
    storage: BTreeMap<String, String>,
}

impl FormSession {
    pub fn builder(document: Document) -> SessionBuilder {
        SessionBuilder::new(document)
    }

    fn initialize(&mut self) {
        self.projector.hide_cards(&mut self.document);
        if self.registry.is_empty() {
            return;
        }
        let nodes: Vec<NodeId> = self.registry.iter().map(|s| s.node).collect();
        for node in nodes {
            self.set_step_visible(node, false);
        }
        if let Some(final_step) = self.registry.final_step() {
            self.document.set_displayed(final_step, false);
        }
        self.show_step(0);
        self.update_progress();
        self.update_navigation();
        self.mark_conditional_elements();
        info!(
            "Form {} initialized with {} steps",
            self.form_id,
            self.registry.len()
        );
    }

    fn mark_conditional_elements(&mut self) {
        let go_to = self.document.query_all(self.form, &Selector::attr("data-go-to"));
        for node in go_to {
            self.document.add_class(node, "has-goto-logic");
        }
        let skip = self.document.query_all(self.form, &Selector::attr("data-skip"));
        for node in skip {
            self.document.add_class(node, "has-skip-logic");
        }
    }

    fn set_step_visible(&mut self, node: NodeId, visible: bool) {
        self.document.set_displayed(node, visible);
        if visible {
            self.document.remove_class(node, "step-hidden");
            self.document.add_class(node, "step-visible");
        } else {
            self.document.remove_class(node, "step-visible");
            self.document.add_class(node, "step-hidden");
        }
        if let Some(index) = self.registry.iter().position(|s| s.node == node) {
            if let Some(step) = self.registry.get_mut(index) {
                step.visible = visible;
            }
        }
    }

    /// Shows step `index` with its active wrapper.
    fn show_step(&mut self, index: usize) {
        let Some(node) = self.registry.get(index).map(|s| s.node) else {
            return;
        };
        self.set_step_visible(node, true);
        self.show_wrappers(index);
    }

    /// Reader bound to this form and configuration.
    pub fn reader(&self) -> FieldValueReader<'_> {
        FieldValueReader::new(
            &self.document,
            self.form,
            &self.config.checkbox,
            self.config.select_reading,
        )
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for hosts that edit the page directly. Registry
    /// metadata is not rediscovered.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// 0-based index of the current step.
    pub fn current_step(&self) -> usize {
        self.state.current()
    }

    pub fn history(&self) -> &[usize] {
        self.state.history()
    }

    pub fn store(&self) -> &FormDataStore {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True when no steps were discovered and the form behaves as a plain
    /// single-screen form.
    pub fn is_inert(&self) -> bool {
        self.registry.is_empty()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Number of deferred tasks waiting on the clock.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Values mirrored at submit time, keyed by storage key.
    pub fn storage(&self) -> &BTreeMap<String, String> {
        &self.storage
    }

    /// Drains the notifications raised since the last call.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }
}
