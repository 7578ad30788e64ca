//! Built-in string members. Positions count characters.

use crate::errors::{self, EvalError};
use crate::value::{NativeFunction, Value};

use super::array::relative_range;

pub(super) fn member(key: &str) -> Option<Value> {
    let native = match key {
        "charAt" => method("charAt", 1, |text, args| {
            let index = args.first().map_or(0.0, Value::to_number);
            let c = if index < 0.0 {
                None
            } else {
                text.chars().nth(index as usize)
            };
            Ok(Value::string(&c.map(String::from).unwrap_or_default()))
        }),
        "charCodeAt" => method("charCodeAt", 1, |text, args| {
            let index = args.first().map_or(0.0, Value::to_number);
            let unit = if index < 0.0 {
                None
            } else {
                text.encode_utf16().nth(index as usize)
            };
            Ok(Value::Number(unit.map_or(f64::NAN, f64::from)))
        }),
        "indexOf" => method("indexOf", 1, |text, args| {
            let needle = args.first().map(Value::to_js_string).unwrap_or_default();
            let position = text
                .find(&needle)
                .map(|byte| text[..byte].chars().count() as f64);
            Ok(Value::Number(position.unwrap_or(-1.0)))
        }),
        "includes" => method("includes", 1, |text, args| {
            let needle = args.first().map(Value::to_js_string).unwrap_or_default();
            Ok(Value::Bool(text.contains(&needle)))
        }),
        "startsWith" => method("startsWith", 1, |text, args| {
            let needle = args.first().map(Value::to_js_string).unwrap_or_default();
            Ok(Value::Bool(text.starts_with(&needle)))
        }),
        "endsWith" => method("endsWith", 1, |text, args| {
            let needle = args.first().map(Value::to_js_string).unwrap_or_default();
            Ok(Value::Bool(text.ends_with(&needle)))
        }),
        "slice" => method("slice", 2, |text, args| {
            let chars: Vec<char> = text.chars().collect();
            let (start, end) = relative_range(chars.len(), args);
            Ok(Value::string(&chars[start..end].iter().collect::<String>()))
        }),
        "toUpperCase" => method("toUpperCase", 0, |text, _| {
            Ok(Value::string(&text.to_uppercase()))
        }),
        "toLowerCase" => method("toLowerCase", 0, |text, _| {
            Ok(Value::string(&text.to_lowercase()))
        }),
        "trim" => method("trim", 0, |text, _| Ok(Value::string(text.trim()))),
        "split" => method("split", 1, |text, args| {
            let parts: Vec<Value> = match args.first() {
                None | Some(Value::Undefined) => vec![Value::string(text)],
                Some(separator) => {
                    let separator = separator.to_js_string();
                    if separator.is_empty() {
                        text.chars().map(|c| Value::string(&c.to_string())).collect()
                    } else {
                        text.split(separator.as_str()).map(Value::string).collect()
                    }
                }
            };
            Ok(Value::array(parts))
        }),
        "toString" => method("toString", 0, |text, _| Ok(Value::string(text))),
        _ => return None,
    };
    Some(Value::native(native))
}

fn method<F>(name: &'static str, arity: usize, body: F) -> NativeFunction
where
    F: Fn(&str, &[Value]) -> Result<Value, EvalError> + 'static,
{
    NativeFunction::new(name, arity, move |this, args| match this {
        Value::Str(text) => body(text, args),
        other => Err(errors::type_error(format!(
            "String method {name} called on incompatible receiver {other}"
        ))),
    })
}
