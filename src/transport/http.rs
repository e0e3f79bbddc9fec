//! HTTP transport for remote delivery
//!
//! Posts JSON batches to the collector's ingestion endpoint. Useful for
//! centralized logging in distributed systems.

use super::Transport;
use crate::core::error::{ClientError, Result};
use crate::core::log_event::Batch;
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Request header carrying the API key when one is configured
const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP transport that POSTs batches to a collector
///
/// The endpoint is `{host}/api/v1/logs/{project_id}`; the batch body is
/// `{"logs": [...]}`. Requests run on the shipper thread only.
///
/// # Example
///
/// ```no_run
/// use logship::transport::HttpTransport;
/// use std::time::Duration;
///
/// let transport = HttpTransport::new(
///     "http://localhost:4610",
///     "my-project",
///     Some("secret".to_string()),
///     Duration::from_secs(10),
/// )
/// .expect("valid collector endpoint");
/// ```
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the given collector host and project
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not form a valid ingestion URL or
    /// the underlying HTTP client cannot be built.
    pub fn new(
        host: &str,
        project_id: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let raw = format!("{}/api/v1/logs/{}", host.trim_end_matches('/'), project_id);
        let endpoint = Url::parse(&raw)
            .map_err(|e| ClientError::config("host", format!("'{}' is not a valid URL: {}", raw, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// The resolved ingestion endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, batch: &Batch) -> Result<()> {
        let mut request = self.client.post(self.endpoint.clone()).json(batch);
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::status(status.as_u16()))
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_construction() {
        let transport = HttpTransport::new(
            "http://localhost:4610",
            "proj-1",
            None,
            Duration::from_secs(5),
        )
        .expect("valid endpoint");

        assert_eq!(
            transport.endpoint().as_str(),
            "http://localhost:4610/api/v1/logs/proj-1"
        );
        assert_eq!(transport.name(), "http");
    }

    #[test]
    fn test_endpoint_trailing_slash_host() {
        let transport = HttpTransport::new(
            "https://logs.example.com/",
            "proj-2",
            Some("key".to_string()),
            Duration::from_secs(5),
        )
        .expect("valid endpoint");

        assert_eq!(
            transport.endpoint().as_str(),
            "https://logs.example.com/api/v1/logs/proj-2"
        );
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = HttpTransport::new("not a url", "proj", None, Duration::from_secs(5));
        assert!(matches!(
            result,
            Err(ClientError::InvalidConfiguration { .. })
        ));
    }
}
