use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::ReportError;

/// The boundary to the host application. The widget talks to its host
/// through exactly two calls: a one-time readiness handshake and the
/// transmission of the reported value.
pub trait Host {
    /// Fired once, before the widget consumes any arguments.
    fn set_ready(&self);

    /// Transmit the reported wire value (`[value]` or `{"error": ...}`).
    fn set_value(&self, value: JsonValue);
}

/// In-process host adapter that retains reported values, for embedders that
/// consume the outcome directly (and for tests).
#[derive(Debug, Default)]
pub struct MemoryHost {
    ready: AtomicBool,
    values: Mutex<Vec<JsonValue>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Every value reported so far, in order.
    pub fn values(&self) -> Vec<JsonValue> {
        self.lock_values().clone()
    }

    pub fn last_value(&self) -> Option<JsonValue> {
        self.lock_values().last().cloned()
    }

    /// Host-side view of the latest report, `Pending` when nothing has been
    /// reported yet.
    pub fn reported(&self) -> ReportedValue {
        self.last_value()
            .as_ref()
            .map_or(ReportedValue::Pending, ReportedValue::from_wire)
    }

    fn lock_values(&self) -> MutexGuard<'_, Vec<JsonValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Host for MemoryHost {
    fn set_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    fn set_value(&self, value: JsonValue) {
        self.lock_values().push(value);
    }
}

/// Host-side decode of a reported wire value.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedValue {
    /// No outcome yet (the empty sequence, or nothing reported at all).
    Pending,
    Finished(JsonValue),
    Failed(JsonValue),
}

impl ReportedValue {
    /// Malformed values decode as `Pending`: the host treats anything it
    /// does not recognize as "not finished yet".
    pub fn from_wire(value: &JsonValue) -> Self {
        match value {
            JsonValue::Array(items) => items
                .first()
                .map_or(ReportedValue::Pending, |first| {
                    ReportedValue::Finished(first.clone())
                }),
            JsonValue::Object(map) => map
                .get("error")
                .map_or(ReportedValue::Pending, |error| {
                    ReportedValue::Failed(error.clone())
                }),
            _ => ReportedValue::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ReportedValue::Pending)
    }

    /// Blocking-host unwrap: the finished value, or an error for pending and
    /// failed reports.
    ///
    /// # Errors
    /// Returns `ReportError::Pending` when no outcome exists yet and
    /// `ReportError::Script` when the widget reported an evaluation error
    pub fn into_result(self) -> Result<JsonValue, ReportError> {
        match self {
            ReportedValue::Pending => Err(ReportError::Pending),
            ReportedValue::Finished(value) => Ok(value),
            ReportedValue::Failed(error) => Err(ReportError::Script(error)),
        }
    }
}
