//! Unified error type for cloudguard.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all cloudguard operations.
#[derive(Error, Debug)]
pub enum CloudGuardError {
    /// Malformed input or a violated session invariant (e.g. duplicate scan id).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend transport failure; the backend could not be reached at all.
    /// Recoverable through the opt-in demo fallback.
    #[error("Scan backend unavailable at {url}: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Backend was reachable but scan execution failed. Never substituted
    /// with demo data.
    #[error("Scan failed ({status}): {message}")]
    ScanFailed { status: u16, message: String },

    /// Unknown scan id on the report path.
    #[error("Scan not found: {0}")]
    NotFound(String),

    /// Backend-side report build failure.
    #[error("Report generation failed for {scan_id}: {message}")]
    Generation { scan_id: String, message: String },

    /// I/O operation failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for cloudguard operations.
pub type Result<T> = std::result::Result<T, CloudGuardError>;

impl CloudGuardError {
    pub fn duplicate_scan(id: &str) -> Self {
        Self::Validation(format!("scan id already present in session: {id}"))
    }

    pub fn unavailable(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Unavailable {
            url: url.into(),
            source: Box::new(source),
        }
    }

    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the root cause of the error chain.
    pub fn root_cause(&self) -> &dyn std::error::Error {
        let mut current: &dyn std::error::Error = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }

    /// Whether the demo fallback is allowed to recover from this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_duplicate_scan_message() {
        let err = CloudGuardError::duplicate_scan("scan_1");
        assert_eq!(
            err.to_string(),
            "Validation error: scan id already present in session: scan_1"
        );
    }

    #[test]
    fn test_scan_failed_display() {
        let err = CloudGuardError::ScanFailed {
            status: 500,
            message: "worker crashed".to_string(),
        };
        assert_eq!(err.to_string(), "Scan failed (500): worker crashed");
    }

    #[test]
    fn test_not_found_display() {
        let err = CloudGuardError::NotFound("scan_42".to_string());
        assert_eq!(err.to_string(), "Scan not found: scan_42");
    }

    #[test]
    fn test_generation_display() {
        let err = CloudGuardError::Generation {
            scan_id: "scan_42".to_string(),
            message: "pdf build error".to_string(),
        };
        assert!(err.to_string().contains("scan_42"));
        assert!(err.to_string().contains("pdf build error"));
    }

    #[test]
    fn test_write_error_display() {
        let err = CloudGuardError::write_error(
            "/tmp/out.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out.json"));
    }

    #[test]
    fn test_only_unavailable_is_recoverable() {
        assert!(!CloudGuardError::duplicate_scan("x").is_recoverable());
        assert!(!CloudGuardError::NotFound("x".to_string()).is_recoverable());
        assert!(
            !CloudGuardError::ScanFailed {
                status: 502,
                message: "bad gateway".to_string(),
            }
            .is_recoverable()
        );
    }

    #[test]
    fn test_root_cause() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "root cause");
        let err = CloudGuardError::write_error("/path", io_err);
        assert!(err.root_cause().to_string().contains("root cause"));
    }
}
