use rquickjs::{Ctx, Function, Object, Result, Value};

/// Symbol key of the global namespace shared between the widget and its
/// sandbox extensions.
pub const INTERNAL_KEY: &str = "jsbridge.internal";

/// Seed the internal namespace and its per-extension sub-namespaces.
/// Must run before any extension installs functions into it.
///
/// # Errors
/// Returns an error if the namespace cannot be created
pub fn init(ctx: &Ctx<'_>) -> Result<()> {
    ctx.eval::<(), _>(
        r#"
        globalThis[Symbol.for("jsbridge.internal")] ||= {};
        globalThis[Symbol.for("jsbridge.internal")].console ||= {};
        globalThis[Symbol.for("jsbridge.internal")].timers ||= {};
        globalThis[Symbol.for("jsbridge.internal")].widget ||= {};
        "#,
    )?;

    Ok(())
}

/// Resolve the internal namespace object from Rust.
///
/// # Errors
/// Returns an error if the namespace has not been initialized
pub fn internal_object<'js>(ctx: &Ctx<'js>) -> Result<Object<'js>> {
    let globals = ctx.globals();
    let symbol_ctor: Function = globals.get("Symbol")?;
    let symbol_for: Function = symbol_ctor.get("for")?;
    let internal_symbol: Value = symbol_for.call((INTERNAL_KEY,))?;
    globals.get(internal_symbol)
}

#[macro_export]
macro_rules! add_internal_function {
    ($ctx:expr, $name:expr, $func:expr) => {{
        use rquickjs::function::Func;
        let temp_name = format!("__jsbridge_internal_{}", $name.replace('.', "_"));
        let internal_path = format!("globalThis[Symbol.for('jsbridge.internal')].{}", $name);

        let func = Func::from($func);
        $ctx.globals().set(temp_name.as_str(), func)?;
        $ctx.eval::<(), _>(format!(
            "{} = globalThis.{}; delete globalThis.{};",
            internal_path, temp_name, temp_name
        ))?
    }};
}
