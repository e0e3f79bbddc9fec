//! Bounded delivery queue decoupling producers from the shipper

use super::log_event::LogEvent;
use super::metrics::ClientMetrics;
use super::overflow_policy::{OverflowCallback, OverflowPolicy};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Bounded FIFO buffer of events awaiting transmission
///
/// Any number of producer threads may enqueue; the shipper is the sole
/// consumer. `enqueue` is O(1) synchronized access and performs no I/O, so
/// a logging call never waits on the network. Overflow is resolved by the
/// configured [`OverflowPolicy`] and counted, never raised.
///
/// # Example
///
/// ```
/// use logship::{ClientMetrics, DeliveryQueue, OverflowPolicy};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(ClientMetrics::new());
/// let queue = DeliveryQueue::new(100, OverflowPolicy::DropOldest, None, metrics);
/// assert!(queue.is_empty());
/// ```
pub struct DeliveryQueue {
    inner: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
    policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    metrics: Arc<ClientMetrics>,
    closed: AtomicBool,
}

impl DeliveryQueue {
    /// Create a queue with the given capacity and overflow policy
    ///
    /// A zero capacity is clamped to one so the queue can always hold the
    /// event being enqueued.
    pub fn new(
        capacity: usize,
        policy: OverflowPolicy,
        on_overflow: Option<OverflowCallback>,
        metrics: Arc<ClientMetrics>,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            policy,
            on_overflow,
            metrics,
            closed: AtomicBool::new(false),
        }
    }

    /// Append an event, applying the overflow policy when full
    ///
    /// Never blocks the caller beyond the queue lock. After [`close`] the
    /// event is rejected and counted as dropped.
    ///
    /// [`close`]: DeliveryQueue::close
    pub fn enqueue(&self, event: LogEvent) {
        if self.closed.load(Ordering::Acquire) {
            self.note_drop();
            return;
        }

        // The overflow alert runs outside the lock: the callback is
        // user-supplied and must not be able to deadlock producers.
        let overflowed = {
            let mut queue = self.inner.lock();
            if queue.len() >= self.capacity {
                self.metrics.record_queue_full();
                match self.policy {
                    OverflowPolicy::DropOldest => {
                        queue.pop_front();
                        queue.push_back(event);
                        self.metrics.record_enqueued();
                    }
                    OverflowPolicy::DropNewest => {}
                }
                true
            } else {
                queue.push_back(event);
                self.metrics.record_enqueued();
                false
            }
        };

        if overflowed {
            self.note_drop();
        }
    }

    /// Remove and return up to `max_count` events or `max_bytes` worth,
    /// preserving enqueue order
    ///
    /// Always yields at least one event when the queue is non-empty, even
    /// if that event alone exceeds the byte budget.
    pub fn dequeue_batch(&self, max_count: usize, max_bytes: usize) -> Vec<LogEvent> {
        let mut queue = self.inner.lock();
        let mut batch = Vec::new();
        let mut bytes = 0usize;

        while batch.len() < max_count {
            let weight = match queue.front() {
                Some(event) => event.byte_weight(),
                None => break,
            };
            if !batch.is_empty() && bytes + weight > max_bytes {
                break;
            }
            if let Some(event) = queue.pop_front() {
                bytes += weight;
                batch.push(event);
            }
        }

        batch
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of pending events
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The configured overflow policy
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Stop accepting new events; pending events remain dequeuable
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Check whether intake has been stopped
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Count a dropped event and alert on the first drop, then every 1000th
    fn note_drop(&self) {
        let dropped = self.metrics.record_dropped();

        let should_alert = dropped == 0 || (dropped + 1).is_multiple_of(1000);
        if should_alert {
            eprintln!(
                "[LOGSHIP WARNING] Delivery queue full, {} events dropped ({}). \
                 Consider increasing the queue capacity.",
                dropped + 1,
                self.policy
            );
            if let Some(ref callback) = self.on_overflow {
                callback(dropped + 1);
            }
        }
    }
}
