//! Client facade wiring configuration, queue, and shipper together

use super::backoff::RetryPolicy;
use super::error::{ClientError, Result};
use super::handle::LoggerHandle;
use super::log_context::ContextNode;
use super::log_level::LogLevel;
use super::metrics::ClientMetrics;
use super::overflow_policy::{OverflowCallback, OverflowPolicy};
use super::queue::DeliveryQueue;
use super::shipper::{Shipper, ShipperConfig, ShipperHandle};
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout for client cleanup (5 seconds)
///
/// Used when the client is dropped without an explicit [`LogClient::close`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Facade owning one delivery queue and one shipper
///
/// Built once per remote project; configuration is immutable afterwards.
/// Instances are fully independent: no process-wide state is shared. The
/// root handle obtained from [`logger`] can be cloned and re-scoped freely
/// by any number of threads.
///
/// [`logger`]: LogClient::logger
///
/// # Example
///
/// ```no_run
/// use logship::{LogClient, LogLevel};
/// use std::time::Duration;
///
/// let mut client = LogClient::builder()
///     .project_id("p1")
///     .host("http://localhost:4610")
///     .api_key("secret")
///     .min_level(LogLevel::Info)
///     .build()
///     .expect("valid configuration");
///
/// client.logger().info("service started");
///
/// if !client.close(Duration::from_secs(10)) {
///     eprintln!("Warning: shutdown timed out, some events were not delivered");
/// }
/// ```
pub struct LogClient {
    queue: Arc<DeliveryQueue>,
    shipper: Option<ShipperHandle>,
    root: LoggerHandle,
    metrics: Arc<ClientMetrics>,
}

impl LogClient {
    /// Create a builder for `LogClient`
    #[must_use]
    pub fn builder() -> LogClientBuilder {
        LogClientBuilder::new()
    }

    /// The root logger handle, bound to an empty context
    #[must_use]
    pub fn logger(&self) -> LoggerHandle {
        self.root.clone()
    }

    /// Delivery metrics for observability
    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    /// Number of events currently awaiting transmission
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Stop intake and drain queued events within `timeout`
    ///
    /// New events are rejected (and counted as dropped) from this point
    /// on. Returns `true` if the shipper finished draining in time;
    /// otherwise the remaining events are abandoned and `false` is
    /// returned. Delivery on shutdown is best effort.
    pub fn close(&mut self, timeout: Duration) -> bool {
        self.queue.close();

        if let Some(mut handle) = self.shipper.take() {
            handle.join_within(timeout)
        } else {
            true
        }
    }
}

impl Drop for LogClient {
    fn drop(&mut self) {
        if self.shipper.is_some() {
            self.close(DEFAULT_SHUTDOWN_TIMEOUT);
        }

        let dropped = self.metrics.events_dropped();
        if dropped > 0 {
            eprintln!(
                "[LOGSHIP WARNING] Client shutting down with {} dropped events (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a [`LogClient`] with a fluent API
///
/// `project_id` and `host` are required; everything else has documented
/// defaults.
///
/// # Example
///
/// ```no_run
/// use logship::{LogClient, LogLevel, OverflowPolicy, RetryPolicy};
/// use std::time::Duration;
///
/// let client = LogClient::builder()
///     .project_id("p1")
///     .host("https://logs.example.com")
///     .min_level(LogLevel::Debug)
///     .queue_capacity(50_000)
///     .overflow_policy(OverflowPolicy::DropNewest)
///     .retry_policy(RetryPolicy::new(
///         5,
///         Duration::from_millis(250),
///         Duration::from_secs(30),
///     ))
///     .build()
///     .expect("valid configuration");
/// # drop(client);
/// ```
pub struct LogClientBuilder {
    project_id: String,
    host: String,
    api_key: Option<String>,
    min_level: LogLevel,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    batch_max_events: usize,
    batch_max_bytes: usize,
    poll_interval: Duration,
    retry_policy: RetryPolicy,
    request_timeout: Duration,
    transport: Option<Box<dyn Transport>>,
}

impl LogClientBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        let shipper_defaults = ShipperConfig::default();
        Self {
            project_id: String::new(),
            host: String::new(),
            api_key: None,
            min_level: LogLevel::Info,
            queue_capacity: 10_000,
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
            batch_max_events: shipper_defaults.batch_max_events,
            batch_max_bytes: shipper_defaults.batch_max_bytes,
            poll_interval: shipper_defaults.poll_interval,
            retry_policy: shipper_defaults.retry,
            request_timeout: Duration::from_secs(10),
            transport: None,
        }
    }

    /// Set the project identifier (required)
    #[must_use = "builder methods return a new value"]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Set the collector base URL (required)
    #[must_use = "builder methods return a new value"]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the API key sent with each request
    ///
    /// An empty key is treated as absent.
    #[must_use = "builder methods return a new value"]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Set the minimum severity to emit
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the delivery queue capacity
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set what happens when the delivery queue is full
    ///
    /// Default is [`OverflowPolicy::DropOldest`].
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Set a callback for overflow notifications
    ///
    /// Invoked with the total dropped-event count when events are dropped.
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Cap the number of events per transmitted batch
    #[must_use = "builder methods return a new value"]
    pub fn batch_max_events(mut self, max_events: usize) -> Self {
        self.batch_max_events = max_events.max(1);
        self
    }

    /// Cap the serialized bytes per transmitted batch
    #[must_use = "builder methods return a new value"]
    pub fn batch_max_bytes(mut self, max_bytes: usize) -> Self {
        self.batch_max_bytes = max_bytes.max(1);
        self
    }

    /// Set how long the shipper sleeps when the queue is empty
    #[must_use = "builder methods return a new value"]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the retry budget applied to each batch
    #[must_use = "builder methods return a new value"]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Set the HTTP request timeout
    #[must_use = "builder methods return a new value"]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the HTTP transport with a custom one
    ///
    /// The host is still validated but no HTTP client is built. This is
    /// the seam tests use to observe delivery without a network.
    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client, validating configuration and starting the shipper
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfiguration`] when `project_id` or
    /// `host` is empty or the host is not a valid URL, and propagates
    /// transport construction or worker spawn failures.
    pub fn build(self) -> Result<LogClient> {
        if self.project_id.is_empty() {
            return Err(ClientError::config("project_id", "must not be empty"));
        }
        if self.host.is_empty() {
            return Err(ClientError::config("host", "must not be empty"));
        }

        let metrics = Arc::new(ClientMetrics::new());
        let queue = Arc::new(DeliveryQueue::new(
            self.queue_capacity,
            self.overflow_policy,
            self.on_overflow,
            Arc::clone(&metrics),
        ));

        let transport: Box<dyn Transport> = match self.transport {
            Some(custom) => custom,
            None => Box::new(HttpTransport::new(
                &self.host,
                &self.project_id,
                self.api_key,
                self.request_timeout,
            )?),
        };

        let shipper = Shipper::spawn(
            Arc::clone(&queue),
            transport,
            ShipperConfig {
                batch_max_events: self.batch_max_events,
                batch_max_bytes: self.batch_max_bytes,
                poll_interval: self.poll_interval,
                retry: self.retry_policy,
            },
            Arc::clone(&metrics),
        )?;

        let root = LoggerHandle::new(
            ContextNode::root(),
            self.min_level,
            Arc::clone(&queue),
            Arc::from(self.project_id.as_str()),
        );

        Ok(LogClient {
            queue,
            shipper: Some(shipper),
            root,
            metrics,
        })
    }
}

impl Default for LogClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_project_id() {
        let result = LogClient::builder().host("http://localhost:4610").build();
        match result {
            Err(ClientError::InvalidConfiguration { component, .. }) => {
                assert_eq!(component, "project_id");
            }
            other => panic!("Expected configuration error, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_build_requires_host() {
        let result = LogClient::builder().project_id("p1").build();
        match result {
            Err(ClientError::InvalidConfiguration { component, .. }) => {
                assert_eq!(component, "host");
            }
            other => panic!("Expected configuration error, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_build_rejects_malformed_host() {
        let result = LogClient::builder()
            .project_id("p1")
            .host("not a url at all")
            .build();
        assert!(matches!(
            result,
            Err(ClientError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_build_and_close() {
        let mut client = LogClient::builder()
            .project_id("p1")
            .host("http://localhost:4610")
            .build()
            .expect("valid configuration");

        assert_eq!(client.pending_events(), 0);
        assert!(client.close(Duration::from_secs(5)));
        // Close is idempotent once the shipper is gone.
        assert!(client.close(Duration::from_secs(5)));
    }

    #[test]
    fn test_empty_api_key_treated_as_absent() {
        let builder = LogClient::builder().api_key("");
        assert!(builder.api_key.is_none());

        let builder = LogClient::builder().api_key("secret");
        assert_eq!(builder.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_independent_clients() {
        let mut a = LogClient::builder()
            .project_id("p1")
            .host("http://localhost:4610")
            .build()
            .expect("valid configuration");
        let mut b = LogClient::builder()
            .project_id("p2")
            .host("http://localhost:4611")
            .build()
            .expect("valid configuration");

        a.logger().info("only for a");
        assert_eq!(b.metrics().events_enqueued(), 0);

        a.close(Duration::from_secs(5));
        b.close(Duration::from_secs(5));
    }
}
