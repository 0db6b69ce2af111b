//! Error types for vc-scout.
//!
//! Library crates use [`ScoutError`] via `thiserror`.
//! The CLI wraps this with `color-eyre`; the HTTP layer maps each variant
//! to a status code and a JSON error body.

use std::path::PathBuf;

/// Top-level error type for all enrichment operations.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Missing or malformed caller input.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Upstream site unreachable or answered with a non-2xx status.
    ///
    /// `status` is `None` for transport failures (DNS, refused, timeout).
    #[error("fetch error: {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// Anything unexpected while parsing or assembling a result.
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Upstream answered, but not with a 2xx.
    pub fn fetch_status(status: u16, msg: impl Into<String>) -> Self {
        Self::Fetch {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// The request never produced a response.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Fetch {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Upstream status code carried by a fetch failure, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ScoutError::validation("url must be a non-empty string");
        assert_eq!(
            err.to_string(),
            "validation error: url must be a non-empty string"
        );

        let err = ScoutError::fetch_status(404, "https://example.com: HTTP 404");
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn upstream_status_only_for_status_failures() {
        assert_eq!(ScoutError::fetch_status(503, "down").upstream_status(), Some(503));
        assert_eq!(ScoutError::transport("dns").upstream_status(), None);
        assert_eq!(ScoutError::Internal("boom".into()).upstream_status(), None);
    }
}
