use rquickjs::{
    AsyncContext, AsyncRuntime, CatchResultExt, Ctx, Function, Module, Object, Promise, Value,
    async_with,
};

use crate::error::{JsError, WidgetError};
use crate::outcome::EvalOutcome;
use crate::value;

/// Runs one snippet as the body of an async function inside an embedded
/// QuickJS engine. The sandbox carries `console` and timers but no
/// filesystem, network, or process access.
pub struct Evaluator {
    runtime: AsyncRuntime,
    context: AsyncContext,
}

impl Evaluator {
    /// Bring up the engine and install the sandbox globals.
    ///
    /// # Errors
    /// Returns an error if the engine or the sandbox cannot be constructed
    pub async fn new() -> Result<Self, WidgetError> {
        let runtime = AsyncRuntime::new()?;
        let context = AsyncContext::full(&runtime).await?;

        async_with!(context => |ctx| {
            setup_sandbox(&ctx)
        })
        .await?;

        Ok(Self { runtime, context })
    }

    /// Evaluate the snippet to settlement. Evaluation errors are captured
    /// into the outcome, never raised; an `Err` here means the engine
    /// plumbing itself failed.
    ///
    /// # Errors
    /// Returns an error if the sandbox plumbing is unusable
    pub async fn evaluate(&self, code: &str) -> Result<EvalOutcome, WidgetError> {
        let context = &self.context;
        let outcome = async_with!(context => |ctx| {
            run_function_body(&ctx, code).await
        })
        .await?;

        if let EvalOutcome::Failure(error) = &outcome {
            // Observability only; the error itself travels in the outcome.
            log::error!("evaluation failed: {error}");
        }

        Ok(outcome)
    }

    /// Drive the engine until no pending jobs remain, giving
    /// fire-and-forget timer callbacks a chance to run.
    pub async fn drain(&self) {
        self.runtime.idle().await;
    }
}

/// Compile the snippet through the async-function constructor, invoke it
/// with no arguments, and await settlement. Every failure path — syntax
/// error at construction, immediate throw, rejection — folds into
/// `EvalOutcome::Failure`.
async fn run_function_body<'js>(
    ctx: &Ctx<'js>,
    code: &str,
) -> Result<EvalOutcome, WidgetError> {
    let builder = function_builder(ctx)?;

    let body: Function = match builder.call((code,)).catch(ctx) {
        Ok(body) => body,
        Err(caught) => return Ok(EvalOutcome::Failure(JsError::from_caught(caught))),
    };

    let pending: Promise = match body.call(()).catch(ctx) {
        Ok(pending) => pending,
        Err(caught) => return Ok(EvalOutcome::Failure(JsError::from_caught(caught))),
    };

    match pending.into_future::<Value>().await.catch(ctx) {
        Ok(value) => Ok(EvalOutcome::Success(value::json_value(&value))),
        Err(caught) => Ok(EvalOutcome::Failure(JsError::from_caught(caught))),
    }
}

fn function_builder<'js>(ctx: &Ctx<'js>) -> Result<Function<'js>, WidgetError> {
    let internal = utils::internal_object(ctx)?;
    let widget: Object = internal.get("widget")?;
    Ok(widget.get("build")?)
}

fn setup_sandbox(ctx: &Ctx<'_>) -> Result<(), WidgetError> {
    utils::init(ctx)?;
    web_console::init(ctx)?;
    web_timers::init(ctx)?;

    let module = Module::evaluate(
        ctx.clone(),
        "widget_bootstrap",
        include_str!("bootstrap.js"),
    )?;
    module.finish::<()>()?;

    Ok(())
}
