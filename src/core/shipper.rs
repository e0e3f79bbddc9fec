//! Background shipper draining the delivery queue

use super::backoff::{Backoff, RetryPolicy};
use super::error::Result;
use super::log_event::Batch;
use super::metrics::ClientMetrics;
use super::queue::DeliveryQueue;
use crate::transport::Transport;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Batching and pacing knobs for the shipper worker
#[derive(Debug, Clone)]
pub struct ShipperConfig {
    /// Maximum events per batch
    pub batch_max_events: usize,
    /// Maximum serialized bytes per batch
    pub batch_max_bytes: usize,
    /// Sleep between queue polls while idle
    pub poll_interval: Duration,
    /// Retry budget applied to each batch
    pub retry: RetryPolicy,
}

impl Default for ShipperConfig {
    fn default() -> Self {
        Self {
            batch_max_events: 100,
            batch_max_bytes: 1024 * 1024,
            poll_interval: Duration::from_millis(200),
            retry: RetryPolicy::default(),
        }
    }
}

/// Background worker that batches and transmits queued events
///
/// Exactly one shipper drains a queue. The loop dequeues a batch, transmits
/// it with bounded retries, and sleeps one poll interval when the queue is
/// empty. Idle pacing and retry backoff are independent. The worker only
/// ever blocks itself; producers never wait on it.
///
/// Each transmission attempt moves PENDING → SENDING → ACKED or FAILED.
/// FAILED attempts retry the same batch with full-jitter exponential
/// backoff; once the budget is exhausted the batch is discarded and the
/// dropped-batch counter incremented.
pub struct Shipper {
    queue: Arc<DeliveryQueue>,
    transport: Box<dyn Transport>,
    config: ShipperConfig,
    metrics: Arc<ClientMetrics>,
    shutdown_rx: Receiver<()>,
}

impl Shipper {
    /// Spawn the worker thread and return its handle
    pub fn spawn(
        queue: Arc<DeliveryQueue>,
        transport: Box<dyn Transport>,
        config: ShipperConfig,
        metrics: Arc<ClientMetrics>,
    ) -> Result<ShipperHandle> {
        let (shutdown_tx, shutdown_rx) = bounded(1);
        let shipper = Shipper {
            queue,
            transport,
            config,
            metrics,
            shutdown_rx,
        };

        let thread = thread::Builder::new()
            .name("logship-shipper".to_string())
            .spawn(move || shipper.run())?;

        Ok(ShipperHandle {
            thread: Some(thread),
            shutdown_tx,
        })
    }

    fn run(mut self) {
        loop {
            let events = self
                .queue
                .dequeue_batch(self.config.batch_max_events, self.config.batch_max_bytes);

            if events.is_empty() {
                if self.queue.is_closed() {
                    break;
                }
                // Idle wait; a shutdown signal wakes the drain immediately.
                match self.shutdown_rx.recv_timeout(self.config.poll_interval) {
                    Ok(()) | Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => {
                        // Controlling handle is gone; stop intake and drain.
                        self.queue.close();
                        continue;
                    }
                }
            } else {
                self.transmit(Batch::new(events));
            }
        }
    }

    /// Transmit one batch, retrying with backoff until acked or exhausted
    fn transmit(&mut self, batch: Batch) {
        let mut backoff = Backoff::new(self.config.retry.base_delay, self.config.retry.max_delay);
        let mut attempt = 1u32;

        loop {
            match self.transport.send(&batch) {
                Ok(()) => {
                    self.metrics.record_batch_sent();
                    self.metrics.record_delivered(batch.len() as u64);
                    return;
                }
                Err(err) => {
                    if attempt >= self.config.retry.max_attempts {
                        let dropped = self.metrics.record_batch_dropped();
                        eprintln!(
                            "[LOGSHIP WARNING] Dropping batch of {} events after {} attempts \
                             via {} transport: {} ({} batches dropped so far)",
                            batch.len(),
                            attempt,
                            self.transport.name(),
                            err,
                            dropped + 1
                        );
                        return;
                    }
                    self.metrics.record_retry();
                    attempt += 1;
                    thread::sleep(backoff.next_delay());
                }
            }
        }
    }
}

/// Handle to a running shipper worker
pub struct ShipperHandle {
    thread: Option<thread::JoinHandle<()>>,
    shutdown_tx: Sender<()>,
}

impl ShipperHandle {
    /// Wake the worker so it drains without waiting out a poll interval
    pub fn signal(&self) {
        let _ = self.shutdown_tx.try_send(());
    }

    /// Wait for the worker to finish draining, up to `timeout`
    ///
    /// Returns `true` when the worker exited in time. On timeout the
    /// worker is abandoned and whatever it had not transmitted is lost;
    /// the caller must tolerate best-effort delivery on shutdown.
    pub fn join_within(&mut self, timeout: Duration) -> bool {
        self.signal();

        let Some(handle) = self.thread.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGSHIP ERROR] Shipper worker panicked during shutdown: {:?}",
                        e
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGSHIP WARNING] Shipper worker did not finish within {:?}. \
                     Unsent events are abandoned.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Check whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread
            .as_ref()
            .map(thread::JoinHandle::is_finished)
            .unwrap_or(true)
    }
}
