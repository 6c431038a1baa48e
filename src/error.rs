//! Error types for the learning platform
//!
//! Each boundary gets its own enum. Nothing here is fatal to a page: render
//! errors become inline fragments, fetch errors become placeholders, widget
//! errors become toasts.

use std::time::Duration;

/// A renderer could not produce markup for its component data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("{field} is required for {variant} component")]
    MissingField {
        variant: &'static str,
        field: &'static str,
    },

    #[error("{field} must be {expected} for {variant} component")]
    InvalidField {
        variant: &'static str,
        field: &'static str,
        expected: &'static str,
    },
}

/// Fetching a static asset (code file, JSON document) failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Mirrors a non-success HTTP status, e.g. `HTTP 404: Not Found`.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("invalid asset path: {0}")]
    InvalidPath(String),

    #[error("remote assets are not served from the site root: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn not_found() -> Self {
        FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        }
    }
}

/// A JSON content document could not be turned into components.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid JSON structure: components array is required")]
    MissingComponents,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failures of the side-effect boundary itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Interactive widget failures.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Element {id} not found within {}ms", .timeout.as_millis())]
    ElementTimeout { id: String, timeout: Duration },

    #[error("Container with ID '{0}' not found")]
    ContainerNotFound(String),

    #[error("share modal {0} is not open")]
    ModalNotOpen(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Umbrella error for callers that don't care which boundary failed.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = RenderError::MissingField {
            variant: "code",
            field: "filePath",
        };
        assert_eq!(err.to_string(), "filePath is required for code component");
    }

    #[test]
    fn test_status_message_matches_http_form() {
        assert_eq!(FetchError::not_found().to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_timeout_message() {
        let err = WidgetError::ElementTimeout {
            id: "material-intro".to_string(),
            timeout: Duration::from_millis(3000),
        };
        assert_eq!(
            err.to_string(),
            "Element material-intro not found within 3000ms"
        );
    }
}
