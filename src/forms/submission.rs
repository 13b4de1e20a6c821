//! Submission records and where they go

use super::form_model::FormModel;
use super::model::FormId;
use super::value::FormValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A submitted value snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub form_id: FormId,
    pub form_name: String,
    pub submitted_at: DateTime<Utc>,
    pub value: FormValue,
}

impl Submission {
    pub fn from_model(model: &FormModel) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id: model.id().clone(),
            form_name: model.name().to_string(),
            submitted_at: Utc::now(),
            value: model.value().clone(),
        }
    }
}

/// Receives submitted form values
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: &Submission);
}

/// Writes submissions to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn submit(&self, submission: &Submission) {
        let value = serde_json::to_string(&submission.value).unwrap_or_default();
        tracing::info!(
            submission_id = %submission.id,
            form_id = %submission.form_id,
            form_name = %submission.form_name,
            submitted_at = %submission.submitted_at.to_rfc3339(),
            "Form submitted with value: {value}"
        );
    }
}
