use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::WidgetError;
use crate::evaluator::Evaluator;
use crate::host::Host;

/// Arguments delivered by the host, once per widget instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalRequest {
    /// The snippet to run as an async function body.
    pub code: String,
    /// Report the outcome back to the host. Defaults to fire-and-forget.
    #[serde(default)]
    pub expect_result: bool,
}

impl EvalRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            expect_result: false,
        }
    }

    pub fn with_result(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            expect_result: true,
        }
    }
}

/// The embedded component. Performs at most one evaluation over its
/// lifetime and reports the outcome to its host when asked to.
pub struct Widget<H: Host> {
    host: H,
    finished: AtomicBool,
}

impl<H: Host> Widget<H> {
    /// Declares readiness to the host; the one-time handshake happens
    /// before any arguments are consumed.
    pub fn new(host: H) -> Self {
        host.set_ready();
        Self {
            host,
            finished: AtomicBool::new(false),
        }
    }

    /// The single execution trigger. A second invocation is a no-op.
    ///
    /// The outcome is reported at settlement; the engine is drained
    /// afterwards so fire-and-forget timer callbacks still get to run.
    ///
    /// # Errors
    /// Returns an error if the engine cannot be brought up
    pub async fn mount(&self, request: &EvalRequest) -> Result<(), WidgetError> {
        if self.finished.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let evaluator = Evaluator::new().await?;
        let outcome = evaluator.evaluate(&request.code).await?;

        if request.expect_result {
            self.host.set_value(outcome.to_wire());
        }

        evaluator.drain().await;
        Ok(())
    }

    /// Blocking wrapper around [`Widget::mount`] for synchronous hosts.
    ///
    /// # Errors
    /// Returns an error if the async runtime or the engine cannot be
    /// brought up
    pub fn mount_blocking(&self, request: &EvalRequest) -> Result<(), WidgetError> {
        let tokio_runtime = tokio::runtime::Runtime::new()?;
        tokio_runtime.block_on(self.mount(request))
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
