//! Application state and core logic

use crate::cms::DirectusClient;
use crate::config::AppConfig;
use crate::forms::{
    Form, FormError, FormEvents, FormId, FormItem, FormModel, FormService, SubmitOutcome,
    TracingSink, ValidatorRegistry,
};
use crate::location::{History, Location, FORM_ID_PARAM};
use crate::state::{AppState, LoadTicket, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Window for the second Ctrl+C of a double-tap quit
const QUIT_WINDOW: Duration = Duration::from_secs(1);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form loading through the CMS
    service: FormService,
    /// Custom validators shared with every loaded form
    validators: Arc<ValidatorRegistry>,
    /// Value-change and submission handling
    events: FormEvents,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance connected to the configured CMS
    pub async fn new(config: &AppConfig, initial: Location) -> Result<Self> {
        let client = DirectusClient::new(config.require_url()?, config.directus_token.as_deref())?;
        tracing::info!(url = %client.base_url(), collection = %config.form_collection, "Using Directus");
        let service =
            FormService::with_collection(Arc::new(client), config.form_collection.clone());
        let events = FormEvents::new(config.field_rules.clone(), Arc::new(TracingSink));

        let mut app = Self::with_parts(service, ValidatorRegistry::with_builtins(), events, initial);
        app.start().await;
        Ok(app)
    }

    /// Assemble an App from its collaborators without touching the network
    pub fn with_parts(
        service: FormService,
        validators: ValidatorRegistry,
        events: FormEvents,
        initial: Location,
    ) -> Self {
        let state = AppState::new(History::new(initial));

        Self {
            state,
            service,
            validators: Arc::new(validators),
            events,
            quit: false,
            last_ctrl_c: None,
        }
    }

    /// Check connectivity, load the catalog and open a deep-linked form
    pub async fn start(&mut self) {
        self.state.cms_connected = self.service.check_connection().await;

        self.refresh_catalog().await;

        let form_id = self
            .state
            .history
            .current()
            .query_param(FORM_ID_PARAM)
            .filter(|id| !id.trim().is_empty())
            .map(FormId::new);
        if let Some(form_id) = form_id {
            if self.load_form(form_id).await {
                if let Some(model) = self.state.session.current() {
                    tracing::info!(form_id = %model.id(), "Form item from query");
                }
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The loaded form, if any
    pub fn current_form(&self) -> Option<&FormModel> {
        self.state.session.current()
    }

    /// Reload the form catalog
    pub async fn refresh_catalog(&mut self) {
        match self.service.load_list().await {
            Ok(forms) => {
                self.state.set_forms(forms);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching form list");
                self.state.set_status("Failed to load forms");
            }
        }
    }

    /// Fetch, normalize and install a form. Returns true when it was installed.
    pub async fn load_form(&mut self, form_id: FormId) -> bool {
        let ticket = self.state.session.begin_load(form_id);
        let result = self.service.load_item(ticket.form_id().as_str()).await;
        self.finish_load(&ticket, result)
    }

    /// Apply the outcome of a fetch. Stale tickets change nothing.
    fn finish_load(&mut self, ticket: &LoadTicket, result: Result<FormItem, FormError>) -> bool {
        match result {
            Ok(item) => {
                let model = FormModel::new(item, Arc::clone(&self.validators));
                if !self.state.session.complete_load(ticket, model) {
                    return false;
                }
                if let Some(model) = self.state.session.current_mut() {
                    self.events.on_value_changed(model);
                }
                self.state.current_view = View::FormContent;
                self.state.status_message = None;
                true
            }
            Err(e) => {
                if self.state.session.fail_load(ticket, &e) {
                    self.state
                        .set_status(format!("Failed to load form {}", ticket.form_id()));
                }
                false
            }
        }
    }

    /// Open the form selected in the catalog and deep-link it
    pub async fn open_selected_form(&mut self) {
        let Some(summary) = self.state.selected_form().cloned() else {
            return;
        };
        tracing::info!(form = %summary.name, "Opening form");

        if self.load_form(summary.id.clone()).await {
            let location = self
                .state
                .history
                .current()
                .with_query_param(FORM_ID_PARAM, summary.id.as_str());
            self.state.history.push_state(location);
        }
    }

    /// Unload the form and go back to the catalog
    pub fn close_form(&mut self) {
        self.state.session.unload();
        self.state.current_view = View::FormList;

        let current = self.state.history.current();
        if current.query_param(FORM_ID_PARAM).is_some() {
            let location = current.without_query_param(FORM_ID_PARAM);
            self.state.history.push_state(location);
        }
    }

    /// Run an edit against the loaded form and react when it changed a value
    pub fn edit_form(&mut self, edit: impl FnOnce(&mut FormModel) -> bool) -> bool {
        let Some(model) = self.state.session.current_mut() else {
            return false;
        };
        if !edit(model) {
            return false;
        }
        self.events.on_value_changed(model);
        true
    }

    /// Submit the loaded form
    pub fn submit_form(&mut self) -> Option<SubmitOutcome> {
        let model = self.state.session.current_mut()?;
        let outcome = self.events.on_submit(model);
        let message = match &outcome {
            SubmitOutcome::Submitted(_) => "Form submitted",
            SubmitOutcome::Rejected => "Form has errors",
        };
        self.state.set_status(message);
        Some(outcome)
    }

    /// The shareable address of the current view
    pub fn deep_link(&self) -> String {
        self.state.history.current().to_string()
    }

    /// Copy the deep link to the clipboard
    pub fn copy_deep_link(&mut self) {
        let link = self.deep_link();
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(link));
        match result {
            Ok(()) => self.state.set_status("Link copied"),
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard unavailable");
                self.state.set_status("Clipboard unavailable");
            }
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }
        self.last_ctrl_c = None;

        match self.state.current_view {
            View::FormList => self.handle_form_list_key(key).await,
            View::FormContent => self.handle_form_content_key(key),
        }
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(previous) if now.duration_since(previous) <= QUIT_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.state.set_status("Press Ctrl+C again to quit");
            }
        }
    }

    /// Handle keys in the catalog view
    async fn handle_form_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.state.forms.len();
                self.state.move_selection_down(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => self.open_selected_form().await,
            KeyCode::Char('r') => {
                self.refresh_catalog().await;
                self.state.set_status(format!("{} forms", self.state.forms.len()));
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the form view
    fn handle_form_content_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Tab => {
                if let Some(model) = self.state.session.current_mut() {
                    model.next_field();
                }
            }
            KeyCode::BackTab => {
                if let Some(model) = self.state.session.current_mut() {
                    model.prev_field();
                }
            }
            KeyCode::Char('s') if ctrl => {
                self.submit_form();
            }
            KeyCode::Char('y') if ctrl => self.copy_deep_link(),
            KeyCode::Char(' ') if self.active_field_is_toggle() => {
                self.edit_form(FormModel::toggle_active);
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit_form(|model| model.input_char(c));
            }
            KeyCode::Backspace => {
                self.edit_form(FormModel::backspace);
            }
            _ => {}
        }
        Ok(())
    }

    fn active_field_is_toggle(&self) -> bool {
        self.current_form()
            .and_then(FormModel::active_field_ref)
            .is_some_and(|f| f.is_toggle())
    }
}
