//! An embedded JavaScript evaluation widget.
//!
//! A host hands the widget one snippet of source text; the widget runs it as
//! the body of an async function inside a sandboxed QuickJS engine and, if
//! asked to, reports the wrapped outcome back: `[value]` on success,
//! `{"error": ...}` on failure.

pub mod error;
pub mod evaluator;
pub mod host;
pub mod outcome;
pub mod value;
pub mod widget;

pub use error::{JsError, ReportError, WidgetError};
pub use evaluator::Evaluator;
pub use host::{Host, MemoryHost, ReportedValue};
pub use outcome::EvalOutcome;
pub use widget::{EvalRequest, Widget};

/// Evaluate one snippet and return its outcome.
///
/// # Errors
/// Returns an error if the async runtime or the engine cannot be brought up
pub fn run_js(code: &str) -> Result<EvalOutcome, WidgetError> {
    let tokio_runtime = tokio::runtime::Runtime::new()?;
    tokio_runtime.block_on(async {
        let evaluator = Evaluator::new().await?;
        evaluator.evaluate(code).await
    })
}
