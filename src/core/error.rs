//! Error types for the logging client
//!
//! Only configuration errors ever reach a caller, at build time. Delivery
//! and encoding failures are absorbed into retries and counters; the types
//! below cross the `Transport` seam internally.

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Collector answered with a non-success status
    #[error("Collector rejected batch: status {status}")]
    UnexpectedStatus { status: u16 },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to spawn the shipper worker thread
    #[error("Failed to start shipper worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    pub fn status(status: u16) -> Self {
        ClientError::UnexpectedStatus { status }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ClientError::Other(msg.into())
    }

    /// Whether this error marks a failed delivery attempt worth retrying
    ///
    /// Every transport failure is retryable; the retry budget, not the
    /// error class, bounds the attempts.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::UnexpectedStatus { .. } | ClientError::Other(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ClientError::config("project_id", "must not be empty");
        assert!(matches!(err, ClientError::InvalidConfiguration { .. }));

        let err = ClientError::status(503);
        assert!(matches!(err, ClientError::UnexpectedStatus { status: 503 }));
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::config("host", "not a valid URL");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for host: not a valid URL"
        );

        let err = ClientError::status(500);
        assert_eq!(err.to_string(), "Collector rejected batch: status 500");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ClientError::status(500).is_retryable());
        assert!(ClientError::status(400).is_retryable());
        assert!(ClientError::other("connection reset").is_retryable());
        assert!(!ClientError::config("host", "empty").is_retryable());
    }
}
