//! Error types for content loading
//!
//! Every variant renders as human-readable text suitable for the inline
//! error panel. Normalization has no variant: it never fails.

use thiserror::Error;

/// Content layer result type
pub type Result<T> = std::result::Result<T, ContentError>;

/// Content loading errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    /// Required configuration (the CMS base URL) is missing or invalid
    #[error("{0}")]
    Configuration(String),

    /// CMS answered with a non-success status
    #[error("{resource} {status}: {body}")]
    Fetch {
        resource: String,
        status: u16,
        body: String,
    },

    /// Request failed before any status was received
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not valid JSON
    #[error("Invalid response: {0}")]
    Parse(String),

    /// Requested singular record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ContentError {
    /// HTTP status for fetch errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ContentError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}

impl From<gallery_common::Error> for ContentError {
    fn from(err: gallery_common::Error) -> Self {
        match err {
            gallery_common::Error::Config(msg) => ContentError::Configuration(msg),
            other => ContentError::Configuration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_shows_status_and_body() {
        let err = ContentError::Fetch {
            resource: "Artworks".to_string(),
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Artworks 500: boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ContentError = gallery_common::Error::Config("no url".to_string()).into();
        assert_eq!(err, ContentError::Configuration("no url".to_string()));
        assert_eq!(err.status(), None);
    }
}
