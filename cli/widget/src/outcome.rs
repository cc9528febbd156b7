use serde_json::Value as JsonValue;

use crate::error::JsError;

/// The success/failure result of one evaluation, produced exactly once per
/// request and discarded once reported.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    Success(JsonValue),
    Failure(JsError),
}

impl EvalOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EvalOutcome::Success(_))
    }

    /// The exchange value reported to the host: `[value]` on success or
    /// `{"error": ...}` on failure. The single-element sequence keeps an
    /// `undefined` result (reported as `[null]`) distinguishable from "no
    /// outcome yet" (the empty sequence).
    pub fn to_wire(&self) -> JsonValue {
        match self {
            EvalOutcome::Success(value) => JsonValue::Array(vec![value.clone()]),
            EvalOutcome::Failure(error) => serde_json::json!({ "error": error.to_wire() }),
        }
    }

    /// Unwrap the outcome, surfacing a captured failure as `Err`.
    ///
    /// # Errors
    /// Returns the evaluation error captured while running the snippet
    pub fn into_result(self) -> Result<JsonValue, JsError> {
        match self {
            EvalOutcome::Success(value) => Ok(value),
            EvalOutcome::Failure(error) => Err(error),
        }
    }
}
