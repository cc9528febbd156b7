use rquickjs::CaughtError;
use serde_json::Value as JsonValue;
use std::fmt;

use crate::value;

/// The single evaluation-error kind: anything raised while running the
/// supplied code. Syntax errors, runtime throws, and async rejections all
/// collapse into this channel; the error is surfaced to the host as data,
/// never re-raised.
#[derive(Debug, Clone, PartialEq)]
pub enum JsError {
    /// A thrown `Error` (or subclass), reduced to its message and stack.
    Exception {
        message: String,
        stack: Option<String>,
    },
    /// A thrown non-`Error` value, carried as its JSON representation.
    Thrown(JsonValue),
    /// An engine-level failure raised while running the snippet.
    Engine(String),
}

impl JsError {
    pub(crate) fn from_caught(caught: CaughtError<'_>) -> Self {
        match caught {
            CaughtError::Exception(exception) => JsError::Exception {
                message: exception
                    .message()
                    .unwrap_or_else(|| "uncaught exception".to_string()),
                stack: exception.stack(),
            },
            CaughtError::Value(thrown) => JsError::Thrown(value::json_value(&thrown)),
            CaughtError::Error(error) => JsError::Engine(error.to_string()),
        }
    }

    /// The `error` field of the reported wire value.
    pub fn to_wire(&self) -> JsonValue {
        match self {
            JsError::Exception { message, stack } => {
                let mut map = serde_json::Map::new();
                map.insert("message".to_string(), JsonValue::String(message.clone()));
                if let Some(stack) = stack {
                    map.insert("stack".to_string(), JsonValue::String(stack.clone()));
                }
                JsonValue::Object(map)
            }
            JsError::Thrown(value) => value.clone(),
            JsError::Engine(message) => serde_json::json!({ "message": message }),
        }
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsError::Exception { message, .. } | JsError::Engine(message) => {
                write!(f, "{message}")
            }
            JsError::Thrown(value) => write!(f, "{value}"),
        }
    }
}

impl std::error::Error for JsError {}

/// Infrastructure failures visible to the embedder: the engine or the async
/// runtime could not be brought up. A failing *evaluation* is never one of
/// these; it is reported as an outcome instead.
#[derive(Debug)]
pub enum WidgetError {
    Engine(rquickjs::Error),
    Io(std::io::Error),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::Engine(error) => write!(f, "engine error: {error}"),
            WidgetError::Io(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WidgetError::Engine(error) => Some(error),
            WidgetError::Io(error) => Some(error),
        }
    }
}

impl From<rquickjs::Error> for WidgetError {
    fn from(error: rquickjs::Error) -> Self {
        WidgetError::Engine(error)
    }
}

impl From<std::io::Error> for WidgetError {
    fn from(error: std::io::Error) -> Self {
        WidgetError::Io(error)
    }
}

/// Host-side failure when unwrapping a reported value.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// No outcome has been reported yet.
    Pending,
    /// The widget reported an evaluation error.
    Script(JsonValue),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Pending => write!(f, "the widget has not reported an outcome yet"),
            ReportError::Script(error) => write!(f, "script error: {error}"),
        }
    }
}

impl std::error::Error for ReportError {}
