//! # Logship
//!
//! A structured logging client that batches and ships log events to a
//! remote collector over HTTP(S).
//!
//! ## Features
//!
//! - **Immutable context chaining**: `with_context` derives scoped child
//!   loggers without locks or copies of the parent chain
//! - **Non-blocking calls**: logging never performs I/O or fails at the
//!   call site; delivery problems become counters
//! - **Asynchronous delivery**: a bounded queue and a background shipper
//!   batch events and retry with backoff
//! - **Thread Safe**: handles are cheaply cloneable and shareable

pub mod core;
pub mod macros;
pub mod transport;

pub mod prelude {
    pub use crate::core::{
        Batch, ClientError, ClientMetrics, ContextNode, DeliveryQueue, FieldValue, Fields,
        LogClient, LogClientBuilder, LogEvent, LogLevel, LoggerHandle, OverflowCallback,
        OverflowPolicy, Result, RetryPolicy, Shipper, ShipperConfig, ShipperHandle,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::transport::{HttpTransport, Transport};
}

pub use crate::core::{
    Batch, ClientError, ClientMetrics, ContextNode, DeliveryQueue, FieldValue, Fields, LogClient,
    LogClientBuilder, LogEvent, LogLevel, LoggerHandle, OverflowCallback, OverflowPolicy, Result,
    RetryPolicy, Shipper, ShipperConfig, ShipperHandle, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::transport::{HttpTransport, Transport};
