//! Directus client module for REST communication

mod client;
mod error;
mod query;
mod traits;

pub use client::DirectusClient;
pub use error::CmsError;
pub use query::Query;
pub use traits::CmsClientTrait;

#[cfg(test)]
pub use traits::MockCmsClientTrait;
