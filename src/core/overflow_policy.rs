//! Overflow policies for the bounded delivery queue
//!
//! When the queue is full, the policy determines which event is sacrificed.
//! Either way the drop is counted and the overflow callback is notified;
//! an overflow is never surfaced to the logging call site.

use std::fmt;
use std::sync::Arc;

/// Policy for handling delivery queue overflow
///
/// # Example
///
/// ```
/// use logship::OverflowPolicy;
///
/// // Default behavior: evict the oldest pending event
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::DropOldest);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Evict the oldest pending event to admit the new one
    ///
    /// Bounds memory while prioritizing freshness. This is the default.
    DropOldest,

    /// Discard the new event, preserving already-queued history
    DropNewest,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::DropOldest
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
        }
    }
}

/// Callback type for overflow notifications
///
/// Called when events are dropped due to queue overflow. The parameter is
/// the total count of dropped events so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_policy_default() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::DropOldest);
    }

    #[test]
    fn test_overflow_policy_display() {
        assert_eq!(OverflowPolicy::DropOldest.to_string(), "DropOldest");
        assert_eq!(OverflowPolicy::DropNewest.to_string(), "DropNewest");
    }
}
