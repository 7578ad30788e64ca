//! `JSON.stringify` / `JSON.parse` on top of `serde_json`.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::errors::{self, error_object, EvalError, EvalResult};
use crate::value::{PropertyMap, Value};

/// `JSON.stringify(value, _, indent)`.
///
/// Returns `undefined` for values with no JSON form (functions,
/// `undefined`). Cycles are a `TypeError`.
pub fn json_stringify(value: &Value, indent: Option<&Value>) -> EvalResult {
    let mut seen = Vec::new();
    let Some(json) = to_json(value, &mut seen)? else {
        return Ok(Value::Undefined);
    };

    let gap = match indent {
        Some(Value::Number(n)) => " ".repeat(n.clamp(0.0, 10.0) as usize),
        Some(Value::Str(s)) => s.chars().take(10).collect(),
        _ => String::new(),
    };

    let text = if gap.is_empty() {
        serde_json::to_string(&json).map_err(|err| errors::type_error(err.to_string()))?
    } else {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut out,
            PrettyFormatter::with_indent(gap.as_bytes()),
        );
        json.serialize(&mut serializer)
            .map_err(|err| errors::type_error(err.to_string()))?;
        String::from_utf8(out).map_err(|err| errors::type_error(err.to_string()))?
    };
    Ok(Value::string(&text))
}

/// `None` for values JSON omits.
fn to_json(value: &Value, seen: &mut Vec<usize>) -> Result<Option<serde_json::Value>, EvalError> {
    let json = match value {
        Value::Undefined | Value::Function(_) | Value::Native(_) => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::Str(s) => serde_json::Value::String(s.to_string()),
        Value::Array(items) => {
            enter(items.addr(), seen)?;
            let mut out = Vec::new();
            for item in items.borrow().iter() {
                out.push(to_json(item, seen)?.unwrap_or(serde_json::Value::Null));
            }
            seen.pop();
            serde_json::Value::Array(out)
        }
        Value::Object(obj) => {
            enter(obj.addr(), seen)?;
            let mut out = serde_json::Map::new();
            for (key, item) in &obj.borrow().properties {
                if let Some(json) = to_json(item, seen)? {
                    out.insert(key.to_string(), json);
                }
            }
            seen.pop();
            serde_json::Value::Object(out)
        }
    };
    Ok(Some(json))
}

fn enter(addr: usize, seen: &mut Vec<usize>) -> Result<(), EvalError> {
    if seen.contains(&addr) {
        return Err(errors::type_error("Converting circular structure to JSON"));
    }
    seen.push(addr);
    Ok(())
}

/// Integral values print without a fraction, non-finite values as `null`.
fn number_to_json(n: f64) -> serde_json::Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

/// `JSON.parse(text)`. Malformed input throws a `SyntaxError` object.
pub fn json_parse(text: &str) -> EvalResult {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Ok(from_json(json)),
        Err(err) => Err(errors::thrown(error_object(
            "SyntaxError",
            &format!("JSON.parse: {err}"),
        ))),
    }
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(&s),
        serde_json::Value::Array(items) => Value::array(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(map) => Value::object(
            map.into_iter()
                .map(|(key, item)| (key.into(), from_json(item)))
                .collect::<PropertyMap>(),
        ),
    }
}
