use rquickjs::function::Async;
use rquickjs::{Ctx, Module, Result};
use std::time::Duration;
use utils::add_internal_function;

async fn sleep(ms: f64) {
    let millis = if ms.is_finite() && ms > 0.0 { ms as u64 } else { 0 };
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Install `setTimeout`/`setInterval` and their clear counterparts into the
/// sandbox, backed by an async native sleep driven by the engine's job loop.
///
/// # Errors
/// Returns an error if module initialization fails
pub fn init(ctx: &Ctx<'_>) -> Result<()> {
    add_internal_function!(ctx, "timers.sleep", Async(sleep));

    let module = Module::evaluate(ctx.clone(), "web_timers", include_str!("timers.js"))?;
    module.finish::<()>()?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code: unwrap is acceptable
mod tests {
    use super::*;
    use rquickjs::{AsyncContext, AsyncRuntime, Promise, async_with};

    async fn with_timers<F>(source: &str) -> F
    where
        F: for<'js> rquickjs::FromJs<'js> + Send + 'static,
    {
        let runtime = AsyncRuntime::new().unwrap();
        let context = AsyncContext::full(&runtime).await.unwrap();
        async_with!(context => |ctx| {
            utils::init(&ctx).unwrap();
            init(&ctx).unwrap();
            let promise: Promise = ctx.eval(source).unwrap();
            promise.into_future::<F>().await.unwrap()
        })
        .await
    }

    #[tokio::test]
    async fn test_set_timeout_fires() {
        let value: i32 = with_timers("new Promise(r => setTimeout(() => r(7), 5))").await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_set_timeout_passes_arguments() {
        let value: String =
            with_timers("new Promise(r => setTimeout((a, b) => r(a + b), 1, 'he', 'llo'))").await;
        assert_eq!(value, "hello");
    }

    #[tokio::test]
    async fn test_clear_timeout_cancels() {
        let fired: bool = with_timers(
            r"new Promise(resolve => {
                let fired = false;
                const id = setTimeout(() => { fired = true; }, 5);
                clearTimeout(id);
                setTimeout(() => resolve(fired), 20);
            })",
        )
        .await;
        assert!(!fired);
    }

    #[tokio::test]
    async fn test_set_interval_repeats_until_cleared() {
        let count: i32 = with_timers(
            r"new Promise(resolve => {
                let count = 0;
                const id = setInterval(() => {
                    count += 1;
                    if (count === 3) {
                        clearInterval(id);
                        resolve(count);
                    }
                }, 1);
            })",
        )
        .await;
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_queue_microtask() {
        let value: i32 =
            with_timers("new Promise(r => queueMicrotask(() => r(11)))").await;
        assert_eq!(value, 11);
    }
}
