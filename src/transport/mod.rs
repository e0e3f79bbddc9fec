//! Transports carrying encoded batches to the collector
//!
//! [`Transport`] is the seam between the shipper and the wire. The shipper
//! treats any `Err` as a failed attempt and applies its retry budget; a
//! transport only has to report honestly, never to recover.

pub mod http;

pub use http::HttpTransport;

use crate::core::error::Result;
use crate::core::log_event::Batch;

/// A destination for encoded event batches
pub trait Transport: Send {
    /// Transmit one batch, blocking the shipper until the attempt resolves
    ///
    /// `Ok(())` acknowledges the whole batch; any error fails the whole
    /// batch. Implementations must only ever block their caller (the
    /// shipper thread), never a logging call site.
    fn send(&mut self, batch: &Batch) -> Result<()>;

    /// Short transport name for diagnostics
    fn name(&self) -> &str;
}
