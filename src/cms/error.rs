//! Error types for CMS communication

use thiserror::Error;

/// Errors returned by the CMS client
#[derive(Debug, Error)]
pub enum CmsError {
    /// Transport failure (DNS, connection refused, TLS, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The requested item or collection does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The static token was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success response
    #[error("Directus returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected envelope
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Client misconfiguration (bad base URL, bad token header)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CmsError {
    /// Map an HTTP status and Directus error message to an error variant
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => CmsError::Unauthorized(message),
            404 => CmsError::NotFound(message),
            _ => CmsError::Status { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_not_found() {
        let err = CmsError::from_status(404, "missing".to_string());
        assert!(matches!(err, CmsError::NotFound(m) if m == "missing"));
    }

    #[test]
    fn test_from_status_maps_auth_codes() {
        assert!(matches!(
            CmsError::from_status(401, String::new()),
            CmsError::Unauthorized(_)
        ));
        assert!(matches!(
            CmsError::from_status(403, String::new()),
            CmsError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_from_status_keeps_other_codes() {
        let err = CmsError::from_status(500, "boom".to_string());
        assert_eq!(err.to_string(), "Directus returned 500: boom");
    }
}
