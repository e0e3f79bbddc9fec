//! Client metrics for observability
//!
//! Counters for monitoring delivery health: dropped events, overflow
//! events, batch outcomes, and retry pressure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for client observability
///
/// Failure inside the client becomes a counter here, never an error at the
/// logging call site.
///
/// # Example
///
/// ```
/// use logship::ClientMetrics;
///
/// let metrics = ClientMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.events_enqueued(), 1);
/// assert_eq!(metrics.events_dropped(), 1);
/// ```
#[derive(Debug)]
pub struct ClientMetrics {
    /// Events accepted into the delivery queue
    events_enqueued: AtomicU64,

    /// Events dropped before transmission: queue overflow or rejection
    /// after close
    events_dropped: AtomicU64,

    /// Events acknowledged by the collector
    events_delivered: AtomicU64,

    /// Number of times the queue was found full on enqueue
    queue_full_events: AtomicU64,

    /// Batches acknowledged by the collector
    batches_sent: AtomicU64,

    /// Batches dropped after exhausting the retry budget
    batches_dropped: AtomicU64,

    /// Individual transmission retries across all batches
    send_retries: AtomicU64,
}

impl ClientMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_enqueued: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            events_delivered: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            batches_sent: AtomicU64::new(0),
            batches_dropped: AtomicU64::new(0),
            send_retries: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_enqueued(&self) -> u64 {
        self.events_enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_delivered(&self) -> u64 {
        self.events_delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_sent(&self) -> u64 {
        self.batches_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_dropped(&self) -> u64 {
        self.batches_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn send_retries(&self) -> u64 {
        self.send_retries.load(Ordering::Relaxed)
    }

    /// Record an accepted event, returning the previous count
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.events_enqueued.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped event, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.events_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record `count` events acknowledged by the collector
    #[inline]
    pub fn record_delivered(&self, count: u64) -> u64 {
        self.events_delivered.fetch_add(count, Ordering::Relaxed)
    }

    /// Record a queue full event
    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an acknowledged batch
    #[inline]
    pub fn record_batch_sent(&self) -> u64 {
        self.batches_sent.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a batch dropped after exhausting its retry budget
    #[inline]
    pub fn record_batch_dropped(&self) -> u64 {
        self.batches_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a transmission retry
    #[inline]
    pub fn record_retry(&self) -> u64 {
        self.send_retries.fetch_add(1, Ordering::Relaxed)
    }

    /// Get the event drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no events have been observed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.events_dropped() as f64;
        let total = self.events_enqueued() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.events_enqueued.store(0, Ordering::Relaxed);
        self.events_dropped.store(0, Ordering::Relaxed);
        self.events_delivered.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.batches_sent.store(0, Ordering::Relaxed);
        self.batches_dropped.store(0, Ordering::Relaxed);
        self.send_retries.store(0, Ordering::Relaxed);
    }
}

impl Default for ClientMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ClientMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            events_enqueued: AtomicU64::new(self.events_enqueued()),
            events_dropped: AtomicU64::new(self.events_dropped()),
            events_delivered: AtomicU64::new(self.events_delivered()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            batches_sent: AtomicU64::new(self.batches_sent()),
            batches_dropped: AtomicU64::new(self.batches_dropped()),
            send_retries: AtomicU64::new(self.send_retries()),
        }
    }
}
