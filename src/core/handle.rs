//! User-facing logger handle

use super::log_context::{ContextNode, Fields};
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::queue::DeliveryQueue;
use std::sync::Arc;

/// Lightweight logging handle bound to one context and a shared sink
///
/// Handles are cheap to clone (a few reference bumps) and safe to share
/// across threads without locking: the context is immutable and the queue
/// is internally synchronized. [`with_context`] derives a child handle over
/// an extended context and never mutates the receiver; the original handle
/// keeps logging with its own context.
///
/// A leveled call below the handle's threshold returns before the message
/// is materialized and performs no encoding.
///
/// [`with_context`]: LoggerHandle::with_context
///
/// # Example
///
/// ```no_run
/// use logship::{Fields, LogClient, LogLevel};
///
/// let client = LogClient::builder()
///     .project_id("p1")
///     .host("http://localhost:4610")
///     .min_level(LogLevel::Info)
///     .build()
///     .expect("valid configuration");
///
/// let logger = client.logger();
/// let order_logger = logger.with_context(Fields::new().with_field("order_id", "o1"));
///
/// order_logger.info("started");
/// order_logger.warning_with(
///     "payment slow",
///     Fields::new().with_field("processing_time_ms", 5000),
/// );
/// ```
#[derive(Clone)]
pub struct LoggerHandle {
    context: Arc<ContextNode>,
    min_level: LogLevel,
    queue: Arc<DeliveryQueue>,
    project_id: Arc<str>,
}

impl LoggerHandle {
    pub(crate) fn new(
        context: Arc<ContextNode>,
        min_level: LogLevel,
        queue: Arc<DeliveryQueue>,
        project_id: Arc<str>,
    ) -> Self {
        Self {
            context,
            min_level,
            queue,
            project_id,
        }
    }

    /// Derive a handle whose context extends this one
    ///
    /// Never blocks and never touches the delivery queue.
    #[must_use]
    pub fn with_context(&self, fields: Fields) -> LoggerHandle {
        LoggerHandle {
            context: self.context.derive(fields),
            min_level: self.min_level,
            queue: Arc::clone(&self.queue),
            project_id: Arc::clone(&self.project_id),
        }
    }

    /// Log a message at the given level
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with(level, message, Fields::new());
    }

    /// Log a message with call-site fields at the given level
    ///
    /// Call-site fields override context fields on key collision. Never
    /// fails and never blocks on I/O; delivery problems become counters.
    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, fields: Fields) {
        if level < self.min_level {
            return;
        }

        let event = LogEvent::assemble(
            level,
            message.into(),
            &self.context,
            fields,
            &self.project_id,
        );
        self.queue.enqueue(event);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    #[inline]
    pub fn debug_with(&self, message: impl Into<String>, fields: Fields) {
        self.log_with(LogLevel::Debug, message, fields);
    }

    #[inline]
    pub fn info_with(&self, message: impl Into<String>, fields: Fields) {
        self.log_with(LogLevel::Info, message, fields);
    }

    #[inline]
    pub fn warning_with(&self, message: impl Into<String>, fields: Fields) {
        self.log_with(LogLevel::Warning, message, fields);
    }

    #[inline]
    pub fn error_with(&self, message: impl Into<String>, fields: Fields) {
        self.log_with(LogLevel::Error, message, fields);
    }

    #[inline]
    pub fn critical_with(&self, message: impl Into<String>, fields: Fields) {
        self.log_with(LogLevel::Critical, message, fields);
    }

    /// Minimum severity this handle emits
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// The context node this handle is bound to
    pub fn context(&self) -> &Arc<ContextNode> {
        &self.context
    }

    /// The project this handle reports under
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}
