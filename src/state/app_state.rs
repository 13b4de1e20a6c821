//! Application state definitions

use super::session::FormSession;
use crate::forms::FormSummary;
use crate::location::History;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Catalog of available forms
    #[default]
    FormList,
    /// The loaded form
    FormContent,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub history: History,

    // Catalog
    pub forms: Vec<FormSummary>,
    pub selected_index: usize,

    // Loaded form
    pub session: FormSession,

    // UI state
    pub cms_connected: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(history: History) -> Self {
        Self {
            current_view: View::default(),
            history,
            forms: Vec::new(),
            selected_index: 0,
            session: FormSession::default(),
            cms_connected: false,
            status_message: None,
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Replace the catalog, keeping the selection in range
    pub fn set_forms(&mut self, forms: Vec<FormSummary>) {
        self.forms = forms;
        if self.selected_index >= self.forms.len() {
            self.selected_index = self.forms.len().saturating_sub(1);
        }
    }

    pub fn selected_form(&self) -> Option<&FormSummary> {
        self.forms.get(self.selected_index)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
