//! Core client types

pub mod backoff;
pub mod client;
pub mod error;
pub mod handle;
pub mod log_context;
pub mod log_event;
pub mod log_level;
pub mod metrics;
pub mod overflow_policy;
pub mod queue;
pub mod shipper;

pub use backoff::RetryPolicy;
pub use client::{LogClient, LogClientBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{ClientError, Result};
pub use handle::LoggerHandle;
pub use log_context::{ContextNode, FieldValue, Fields};
pub use log_event::{Batch, LogEvent};
pub use log_level::LogLevel;
pub use metrics::ClientMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use queue::DeliveryQueue;
pub use shipper::{Shipper, ShipperConfig, ShipperHandle};
