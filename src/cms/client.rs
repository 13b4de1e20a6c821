//! REST client for communicating with a Directus instance
//!
//! Requests go to the `/items` endpoints with a static access token. Every
//! successful response is wrapped in a `{"data": ...}` envelope and every
//! failure in `{"errors": [{"message": ...}]}`.

use super::{CmsClientTrait, CmsError, Query};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Upper bound for a whole request; loads are awaited on the UI thread
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Client for communicating with Directus
pub struct DirectusClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectusClient {
    /// Create a client for a base URL, authenticating with a static token when given
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, CmsError> {
        Self::with_timeout(base_url, token, REQUEST_TIMEOUT)
    }

    fn with_timeout(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, CmsError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CmsError::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| CmsError::Config(format!("invalid access token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// The normalized base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/items/{}",
            self.base_url,
            urlencoding::encode(collection)
        )
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(collection),
            urlencoding::encode(id)
        )
    }

    async fn get_data<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &Query,
    ) -> Result<T, CmsError> {
        tracing::debug!(%url, params = ?query.to_params(), "Directus request");

        let response = self.http.get(&url).query(&query.to_params()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::from_status(
                status.as_u16(),
                error_message(&body, status.canonical_reason()),
            ));
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CmsClientTrait for DirectusClient {
    async fn check_connection(&self) -> bool {
        let url = format!("{}/server/ping", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Directus is not reachable");
                false
            }
        }
    }

    async fn read_by_query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, CmsError> {
        self.get_data(self.collection_url(collection), query).await
    }

    async fn read_one(&self, collection: &str, id: &str, query: &Query) -> Result<Value, CmsError> {
        self.get_data(self.item_url(collection, id), query).await
    }
}

/// Extract the human readable message from a Directus error body
fn error_message(body: &str, fallback: Option<&str>) -> String {
    let messages: Vec<String> = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.errors.into_iter().map(|e| e.message).collect())
        .unwrap_or_default();

    if !messages.is_empty() {
        messages.join("; ")
    } else if !body.trim().is_empty() {
        body.trim().to_string()
    } else {
        fallback.unwrap_or("unknown error").to_string()
    }
}
