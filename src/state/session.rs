//! Currently loaded form and load bookkeeping
//!
//! Every load takes a ticket. Only the most recent ticket may complete, so
//! a slow response for a form the user has already moved away from is
//! dropped instead of replacing the newer form.

use crate::forms::{FormError, FormId, FormModel};

/// What the form view is showing
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    NoForm,
    Loaded(FormModel),
}

/// Handle for one in-flight load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    form_id: FormId,
}

impl LoadTicket {
    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }
}

#[derive(Debug, Default)]
pub struct FormSession {
    state: LoadState,
    generation: u64,
    pending: Option<LoadTicket>,
}

impl FormSession {
    /// Start loading a form; supersedes any load still pending
    pub fn begin_load(&mut self, form_id: FormId) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            form_id,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Install a loaded model. Returns false when the ticket is stale.
    pub fn complete_load(&mut self, ticket: &LoadTicket, model: FormModel) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(
                form_id = %ticket.form_id,
                "Discarding stale form load"
            );
            return false;
        }
        self.pending = None;
        self.state = LoadState::Loaded(model);
        true
    }

    /// Record a failed load; whatever was displayed before stays.
    /// Returns false when the ticket is stale.
    pub fn fail_load(&mut self, ticket: &LoadTicket, error: &FormError) -> bool {
        tracing::error!(form_id = %ticket.form_id, error = %error, "Error fetching form");
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Drop the loaded form and invalidate pending loads
    pub fn unload(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.state = LoadState::NoForm;
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    #[cfg(test)]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn current(&self) -> Option<&FormModel> {
        match &self.state {
            LoadState::Loaded(model) => Some(model),
            LoadState::NoForm => None,
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut FormModel> {
        match &mut self.state {
            LoadState::Loaded(model) => Some(model),
            LoadState::NoForm => None,
        }
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&LoadTicket> {
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::CmsError;
    use crate::forms::{FormItem, ValidatorRegistry};
    use std::sync::Arc;

    fn model(name: &str) -> FormModel {
        let item = FormItem {
            name: name.to_string(),
            id: FormId::new(name),
            description: None,
            css_classes: None,
            submit_endpoint: None,
            fields: vec![],
            invalid: false,
            disabled: false,
        };
        FormModel::new(item, Arc::new(ValidatorRegistry::new()))
    }

    #[test]
    fn test_starts_without_form() {
        let session = FormSession::default();
        assert!(matches!(session.state(), LoadState::NoForm));
        assert!(session.current().is_none());
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_complete_load_installs_model() {
        let mut session = FormSession::default();
        let ticket = session.begin_load(FormId::new("a"));
        assert_eq!(session.pending(), Some(&ticket));
        assert!(session.complete_load(&ticket, model("a")));
        assert_eq!(session.current().unwrap().name(), "a");
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = FormSession::default();
        let slow = session.begin_load(FormId::new("old"));
        let fast = session.begin_load(FormId::new("new"));

        assert!(session.complete_load(&fast, model("new")));
        assert!(!session.complete_load(&slow, model("old")));
        assert_eq!(session.current().unwrap().name(), "new");
    }

    #[test]
    fn test_failure_keeps_previous_form() {
        let mut session = FormSession::default();
        let first = session.begin_load(FormId::new("a"));
        session.complete_load(&first, model("a"));

        let second = session.begin_load(FormId::new("b"));
        let error = FormError::Cms(CmsError::NotFound("b".to_string()));
        assert!(session.fail_load(&second, &error));

        assert_eq!(session.current().unwrap().name(), "a");
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_failure_at_startup_leaves_no_form() {
        let mut session = FormSession::default();
        let ticket = session.begin_load(FormId::new("a"));
        session.fail_load(&ticket, &FormError::EmptyId);
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_stale_failure_keeps_newer_pending_load() {
        let mut session = FormSession::default();
        let slow = session.begin_load(FormId::new("a"));
        let fast = session.begin_load(FormId::new("b"));

        assert!(!session.fail_load(&slow, &FormError::EmptyId));
        assert_eq!(session.pending(), Some(&fast));
    }

    #[test]
    fn test_unload_invalidates_pending() {
        let mut session = FormSession::default();
        let first = session.begin_load(FormId::new("a"));
        session.complete_load(&first, model("a"));
        let pending = session.begin_load(FormId::new("b"));

        session.unload();

        assert!(!session.is_loaded());
        assert!(!session.complete_load(&pending, model("b")));
        assert!(!session.is_loaded());
    }
}
