//! Form domain layer
//!
//! CMS records are normalized into [`FormItem`]s, wrapped in an editable
//! [`FormModel`] that checks custom validators, and observed by
//! [`FormEvents`] for value-change side effects and submissions.

mod form_model;
mod model;
mod raw;
mod service;
mod submission;
mod validators;
mod value;
mod wiring;

pub use form_model::{Form, FormModel};
pub use model::{FormField, FormId, FormItem, FormSummary};
pub use service::{FormError, FormService, DEFAULT_COLLECTION};
pub use submission::TracingSink;
pub use validators::ValidatorRegistry;
pub use wiring::{FieldRule, FormEvents, SubmitOutcome};

#[cfg(test)]
pub use submission::{MockSubmissionSink, SubmissionSink};
