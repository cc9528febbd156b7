use rquickjs::{Ctx, Module, Result};
use utils::add_internal_function;

/// Install `console` into the sandbox. Output goes to the host's `log`
/// facade rather than stdout: the widget runs inside a host application and
/// console output is diagnostic only.
///
/// # Errors
/// Returns an error if module initialization fails
pub fn init(ctx: &Ctx<'_>) -> Result<()> {
    add_internal_function!(ctx, "console.print", |level: u32, line: String| {
        match level {
            0 => log::debug!(target: "widget", "{line}"),
            2 => log::warn!(target: "widget", "{line}"),
            3 => log::error!(target: "widget", "{line}"),
            _ => log::info!(target: "widget", "{line}"),
        }
    });

    let module = Module::evaluate(ctx.clone(), "web_console", include_str!("console.js"))?;
    module.finish::<()>()?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code: unwrap is acceptable
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime};

    fn with_console<R>(f: impl FnOnce(&Ctx<'_>) -> R) -> R {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(|ctx| {
            utils::init(&ctx).unwrap();
            init(&ctx).unwrap();
            f(&ctx)
        })
    }

    #[test]
    fn test_console_methods_exist() {
        with_console(|ctx| {
            for method in ["log", "info", "debug", "warn", "error", "trace", "assert"] {
                let defined: bool = ctx
                    .eval(format!("typeof console.{method} === 'function'"))
                    .unwrap();
                assert!(defined, "console.{method} should be a function");
            }
        });
    }

    #[test]
    fn test_console_accepts_mixed_arguments() {
        with_console(|ctx| {
            ctx.eval::<(), _>(
                "console.log('text', 42, true, null, undefined, {a: 1}, [1, 2], () => {});",
            )
            .unwrap();
            ctx.eval::<(), _>("console.error(new Error('boom'));").unwrap();
            ctx.eval::<(), _>("console.assert(1 === 2, 'mismatch');").unwrap();
        });
    }

    #[test]
    fn test_console_survives_cyclic_values() {
        with_console(|ctx| {
            ctx.eval::<(), _>("const o = {}; o.self = o; console.log(o);")
                .unwrap();
        });
    }
}
