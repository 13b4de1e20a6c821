//! Trait abstraction for the CMS client to enable mocking in tests

use super::{CmsError, Query};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for CMS item operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CmsClientTrait: Send + Sync {
    /// Check if the CMS is reachable
    async fn check_connection(&self) -> bool;

    /// Read the items of a collection matching a query
    async fn read_by_query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, CmsError>;

    /// Read a single item of a collection by primary key
    async fn read_one(&self, collection: &str, id: &str, query: &Query) -> Result<Value, CmsError>;
}
