//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```no_run
//! use logship::prelude::*;
//! use logship::info;
//!
//! let client = LogClient::builder()
//!     .project_id("p1")
//!     .host("http://localhost:4610")
//!     .build()
//!     .expect("valid configuration");
//! let logger = client.logger();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```no_run
/// # use logship::prelude::*;
/// # let client = LogClient::builder().project_id("p1").host("http://localhost:4610").build().unwrap();
/// # let logger = client.logger();
/// use logship::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{ClientMetrics, ContextNode, DeliveryQueue, LogLevel, LoggerHandle, OverflowPolicy};
    use std::sync::Arc;

    fn test_handle() -> (LoggerHandle, Arc<DeliveryQueue>) {
        let metrics = Arc::new(ClientMetrics::new());
        let queue = Arc::new(DeliveryQueue::new(
            100,
            OverflowPolicy::DropOldest,
            None,
            metrics,
        ));
        let handle = LoggerHandle::new(
            ContextNode::root(),
            LogLevel::Debug,
            Arc::clone(&queue),
            Arc::from("p1"),
        );
        (handle, queue)
    }

    #[test]
    fn test_log_macro() {
        let (logger, queue) = test_handle();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Error, "Formatted: {}", 42);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_leveled_macros() {
        let (logger, queue) = test_handle();
        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100);
        warning!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        critical!(logger, "Critical failure: {}", "disk full");
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_macro_respects_threshold() {
        let metrics = Arc::new(ClientMetrics::new());
        let queue = Arc::new(DeliveryQueue::new(
            100,
            OverflowPolicy::DropOldest,
            None,
            metrics,
        ));
        let logger = LoggerHandle::new(
            ContextNode::root(),
            LogLevel::Error,
            Arc::clone(&queue),
            Arc::from("p1"),
        );

        info!(logger, "filtered out");
        assert!(queue.is_empty());
    }
}
