//! Log event and batch structures

use super::log_context::{ContextNode, FieldValue, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fallback weight when an event cannot be sized exactly.
///
/// Only reachable if JSON encoding of an already-coerced event fails, which
/// the coercion rules rule out; the constant keeps byte budgeting total.
const FALLBACK_EVENT_WEIGHT: usize = 256;

/// One logging call, encoded and ready for transmission
///
/// Events are immutable once built. The timestamp is assigned when the
/// logging method is invoked, not when the event is transmitted, so latency
/// between call and delivery stays measurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub fields: BTreeMap<String, FieldValue>,
    pub project_id: String,
    #[serde(skip)]
    weight: usize,
}

impl LogEvent {
    /// Sanitize the message to prevent log injection
    ///
    /// Newlines, carriage returns, and tabs are replaced with escape
    /// sequences so a caller-supplied message cannot fake additional
    /// records downstream.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Encode an event with an explicit timestamp
    ///
    /// Deterministic given identical inputs: context fields are applied
    /// first, call-site fields override them, keys are kept sorted, and
    /// values are coerced to a transmissible form. Empty call-site keys are
    /// dropped. This never fails; unencodable values degrade to strings.
    pub fn at(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: String,
        context: &ContextNode,
        fields: Fields,
        project_id: &str,
    ) -> Self {
        let mut merged = context.resolve();
        for (key, value) in fields {
            if key.is_empty() {
                continue;
            }
            merged.insert(key, value);
        }
        let merged: BTreeMap<String, FieldValue> = merged
            .into_iter()
            .map(|(k, v)| (k, v.coerced()))
            .collect();

        let mut event = Self {
            timestamp,
            level,
            message: Self::sanitize_message(&message),
            fields: merged,
            project_id: project_id.to_string(),
            weight: 0,
        };
        event.weight = serde_json::to_vec(&event)
            .map(|bytes| bytes.len())
            .unwrap_or(FALLBACK_EVENT_WEIGHT);
        event
    }

    /// Encode an event stamped with the current time
    pub fn assemble(
        level: LogLevel,
        message: String,
        context: &ContextNode,
        fields: Fields,
        project_id: &str,
    ) -> Self {
        Self::at(Utc::now(), level, message, context, fields, project_id)
    }

    /// Serialized size of this event in bytes, cached at construction
    ///
    /// Used by the delivery queue to honor per-batch byte budgets without
    /// re-serializing events.
    #[inline]
    pub fn byte_weight(&self) -> usize {
        // Deserialized events carry weight 0; resize lazily.
        if self.weight == 0 {
            serde_json::to_vec(self)
                .map(|bytes| bytes.len())
                .unwrap_or(FALLBACK_EVENT_WEIGHT)
        } else {
            self.weight
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// An ordered run of events assembled for one transmission attempt
///
/// Owned exclusively by the shipper for its lifetime; serialized as
/// `{"logs": [...]}` on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    #[serde(rename = "logs")]
    events: Vec<LogEvent>,
}

impl Batch {
    pub fn new(events: Vec<LogEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of the cached event weights
    pub fn byte_weight(&self) -> usize {
        self.events.iter().map(LogEvent::byte_weight).sum()
    }
}
