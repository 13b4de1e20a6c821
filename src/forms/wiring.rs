//! Reactions to form value changes and submissions

use super::form_model::FormModel;
use super::submission::{Submission, SubmissionSink};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Disables one field of a named form while another field holds a sentinel value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Name of the form the rule applies to
    pub form: String,
    /// Field whose value is watched
    pub when_field: String,
    /// Sentinel value that triggers the rule. Compared as JSON, so `1` does
    /// not match `"1"`.
    pub equals: Value,
    /// Field that is disabled while the sentinel is present
    pub disable_field: String,
}

impl FieldRule {
    /// The demo rule: typing `a` as full name locks the email field
    pub fn demo() -> Self {
        Self {
            form: "Demo Form".to_string(),
            when_field: "fullName".to_string(),
            equals: Value::String("a".to_string()),
            disable_field: "email".to_string(),
        }
    }

    /// Recompute the target field's disabled flag from the current values.
    /// Returns true when the flag changed.
    pub fn apply(&self, model: &mut FormModel) -> bool {
        if model.name() != self.form {
            return false;
        }
        let disabled = model.value().get(&self.when_field).equals(&self.equals);
        match model.field_mut(&self.disable_field) {
            Some(field) if field.disabled != disabled => {
                field.disabled = disabled;
                true
            }
            _ => false,
        }
    }
}

/// Outcome of a submit request
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Submission),
    Rejected,
}

/// Value-change and submission handling for the loaded form
pub struct FormEvents {
    rules: Vec<FieldRule>,
    sink: Arc<dyn SubmissionSink>,
}

impl FormEvents {
    pub fn new(rules: Vec<FieldRule>, sink: Arc<dyn SubmissionSink>) -> Self {
        Self { rules, sink }
    }

    /// Apply field rules and re-run custom validators after a value change
    pub fn on_value_changed(&self, model: &mut FormModel) {
        for rule in &self.rules {
            if rule.apply(model) {
                tracing::debug!(
                    form = %model.name(),
                    field = %rule.disable_field,
                    "Field disabled state recomputed"
                );
            }
        }
        model.run_custom_validators();
    }

    /// Validate and forward the value snapshot to the sink
    pub fn on_submit(&self, model: &mut FormModel) -> SubmitOutcome {
        if !model.run_custom_validators() {
            tracing::warn!(form = %model.name(), "Submission rejected by custom validators");
            return SubmitOutcome::Rejected;
        }
        let submission = Submission::from_model(model);
        self.sink.submit(&submission);
        SubmitOutcome::Submitted(submission)
    }
}
