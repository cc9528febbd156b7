use rquickjs::{Array, Object, Value};
use serde_json::{Map, Number, Value as JsonValue};

// Cyclic values must not hang or overflow the widget; past this depth the
// conversion degrades to null.
const MAX_DEPTH: usize = 64;

/// Convert an engine value into the dynamic JSON representation reported to
/// the host. The mapping follows the JSON serialization the host protocol
/// applies to every reported value: `undefined` and functions degrade to
/// `null` (and are omitted from objects), non-finite numbers become `null`.
pub fn json_value(value: &Value<'_>) -> JsonValue {
    json_value_at(value, 0)
}

fn json_value_at(value: &Value<'_>, depth: usize) -> JsonValue {
    if depth >= MAX_DEPTH {
        return JsonValue::Null;
    }
    if value.is_undefined() || value.is_null() {
        return JsonValue::Null;
    }
    if let Some(boolean) = value.as_bool() {
        return JsonValue::Bool(boolean);
    }
    if let Some(int) = value.as_int() {
        return JsonValue::from(i64::from(int));
    }
    if let Some(float) = value.as_float() {
        return Number::from_f64(float).map_or(JsonValue::Null, JsonValue::Number);
    }
    if let Some(string) = value.as_string() {
        return string
            .to_string()
            .map_or(JsonValue::Null, JsonValue::String);
    }
    if let Some(array) = value.as_array() {
        return json_array(array, depth);
    }
    // Functions are objects; rule them out before the object walk.
    if value.is_function() {
        return JsonValue::Null;
    }
    if let Some(object) = value.as_object() {
        return json_object(object, depth);
    }
    // Symbols, bigints and other non-JSON values
    JsonValue::Null
}

fn json_array(array: &Array<'_>, depth: usize) -> JsonValue {
    let mut items = Vec::with_capacity(array.len());
    for item in array.iter::<Value>() {
        match item {
            Ok(value) if value.is_undefined() || value.is_function() => {
                items.push(JsonValue::Null);
            }
            Ok(value) => items.push(json_value_at(&value, depth + 1)),
            Err(_) => items.push(JsonValue::Null),
        }
    }
    JsonValue::Array(items)
}

fn json_object(object: &Object<'_>, depth: usize) -> JsonValue {
    let mut map = Map::new();
    for prop in object.props::<String, Value>() {
        let Ok((key, value)) = prop else { continue };
        // JSON semantics: such properties are omitted entirely.
        if value.is_undefined() || value.is_function() {
            continue;
        }
        map.insert(key, json_value_at(&value, depth + 1));
    }
    JsonValue::Object(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code: unwrap is acceptable
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime};
    use serde_json::json;

    fn convert(source: &str) -> JsonValue {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(|ctx| {
            let value: Value = ctx.eval(source).unwrap();
            json_value(&value)
        })
    }

    #[test]
    fn test_scalars() {
        assert_eq!(convert("1 + 1"), json!(2));
        assert_eq!(convert("1.5"), json!(1.5));
        assert_eq!(convert("'hello'"), json!("hello"));
        assert_eq!(convert("true"), json!(true));
        assert_eq!(convert("false"), json!(false));
        assert_eq!(convert("null"), JsonValue::Null);
        assert_eq!(convert("undefined"), JsonValue::Null);
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        assert_eq!(convert("NaN"), JsonValue::Null);
        assert_eq!(convert("Infinity"), JsonValue::Null);
        assert_eq!(convert("-Infinity"), JsonValue::Null);
    }

    #[test]
    fn test_arrays() {
        assert_eq!(convert("[1, 'two', false]"), json!([1, "two", false]));
        assert_eq!(convert("[]"), json!([]));
        assert_eq!(convert("[[1], [2, [3]]]"), json!([[1], [2, [3]]]));
    }

    #[test]
    fn test_array_holes_and_functions_become_null() {
        assert_eq!(convert("[undefined, () => {}, 3]"), json!([null, null, 3]));
    }

    #[test]
    fn test_objects() {
        assert_eq!(
            convert("({ a: 1, b: 'two', c: { d: [true] } })"),
            json!({ "a": 1, "b": "two", "c": { "d": [true] } })
        );
    }

    #[test]
    fn test_object_skips_undefined_and_function_properties() {
        assert_eq!(
            convert("({ keep: 1, gone: undefined, fn: () => {} })"),
            json!({ "keep": 1 })
        );
    }

    #[test]
    fn test_function_becomes_null() {
        assert_eq!(convert("(() => {})"), JsonValue::Null);
        assert_eq!(convert("Symbol('s')"), JsonValue::Null);
    }

    #[test]
    fn test_cyclic_object_is_depth_capped() {
        // Must terminate; the innermost reference degrades to null.
        let value = convert("(() => { const o = { n: 1 }; o.self = o; return o; })()");
        assert_eq!(value.get("n"), Some(&json!(1)));
    }
}
