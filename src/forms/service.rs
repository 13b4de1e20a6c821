//! Loading form catalogs and definitions from the CMS

use super::model::{FormId, FormItem, FormSummary};
use super::raw::{normalize_form, RawFormRecord, FORM_ITEM_FIELDS, FORM_LIST_FIELDS};
use crate::cms::{CmsClientTrait, CmsError, Query};
use std::sync::Arc;
use thiserror::Error;

/// Default collection holding form records
pub const DEFAULT_COLLECTION: &str = "form";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Form id must not be empty")]
    EmptyId,

    #[error(transparent)]
    Cms(#[from] CmsError),

    #[error("Form record has an unexpected shape: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reads forms through a CMS client
#[derive(Clone)]
pub struct FormService {
    client: Arc<dyn CmsClientTrait>,
    collection: String,
}

impl FormService {
    #[cfg(test)]
    pub fn new(client: Arc<dyn CmsClientTrait>) -> Self {
        Self::with_collection(client, DEFAULT_COLLECTION)
    }

    pub fn with_collection(client: Arc<dyn CmsClientTrait>, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    pub async fn check_connection(&self) -> bool {
        self.client.check_connection().await
    }

    /// List every form (no page limit)
    pub async fn load_list(&self) -> Result<Vec<FormSummary>, FormError> {
        let query = Query::fields(FORM_LIST_FIELDS).unlimited();
        let rows = self.client.read_by_query(&self.collection, &query).await?;

        let forms = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<FormSummary>, _>>()?;

        tracing::info!(count = forms.len(), "Loaded form catalog");
        Ok(forms)
    }

    /// Fetch one form with its fields and rules and normalize it
    pub async fn load_item(&self, id: &str) -> Result<FormItem, FormError> {
        let id = FormId::new(id.trim());
        if id.is_empty() {
            return Err(FormError::EmptyId);
        }

        let query = Query::fields(FORM_ITEM_FIELDS);
        let record = self
            .client
            .read_one(&self.collection, id.as_str(), &query)
            .await?;
        let record: RawFormRecord = serde_json::from_value(record)?;
        let item = normalize_form(record);

        tracing::info!(
            form_id = %item.id,
            form_name = %item.name,
            fields = item.fields.len(),
            "Loaded form definition"
        );
        Ok(item)
    }
}
