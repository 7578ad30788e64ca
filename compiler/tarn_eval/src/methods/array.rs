//! Built-in array members.

use crate::errors::{self, EvalError};
use crate::shared::Shared;
use crate::value::{NativeFunction, Value};

/// Look up a built-in array method by name.
pub(super) fn member(key: &str) -> Option<Value> {
    let native = match key {
        "push" => method("push", 1, |items, args| {
            let mut items = items.borrow_mut();
            items.extend(args.iter().cloned());
            Ok(Value::Number(items.len() as f64))
        }),
        "pop" => method("pop", 0, |items, _| {
            Ok(items.borrow_mut().pop().unwrap_or_default())
        }),
        "shift" => method("shift", 0, |items, _| {
            let mut items = items.borrow_mut();
            if items.is_empty() {
                return Ok(Value::Undefined);
            }
            Ok(items.remove(0))
        }),
        "unshift" => method("unshift", 1, |items, args| {
            let mut items = items.borrow_mut();
            let mut front = args.to_vec();
            front.append(&mut items);
            *items = front;
            Ok(Value::Number(items.len() as f64))
        }),
        "join" => method("join", 1, |items, args| {
            let separator = match args.first() {
                None | Some(Value::Undefined) => ",".to_string(),
                Some(sep) => sep.to_js_string(),
            };
            let joined = items
                .borrow()
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_js_string(),
                })
                .collect::<Vec<_>>()
                .join(&separator);
            Ok(Value::string(&joined))
        }),
        "indexOf" => method("indexOf", 1, |items, args| {
            let needle = args.first().cloned().unwrap_or_default();
            let position = items
                .borrow()
                .iter()
                .position(|item| item.strict_equals(&needle));
            Ok(Value::Number(position.map_or(-1.0, |i| i as f64)))
        }),
        "includes" => method("includes", 1, |items, args| {
            let needle = args.first().cloned().unwrap_or_default();
            // SameValueZero: NaN finds NaN.
            Ok(Value::Bool(items.borrow().iter().any(|item| *item == needle)))
        }),
        "slice" => method("slice", 2, |items, args| {
            let items = items.borrow();
            let (start, end) = relative_range(items.len(), args);
            Ok(Value::array(items[start..end].to_vec()))
        }),
        "concat" => method("concat", 1, |items, args| {
            let mut out = items.borrow().clone();
            for arg in args {
                match arg {
                    Value::Array(more) => out.extend(more.borrow().iter().cloned()),
                    other => out.push(other.clone()),
                }
            }
            Ok(Value::array(out))
        }),
        "reverse" => NativeFunction::new("reverse", 0, |this, _| {
            let items = this_array(this)?;
            items.borrow_mut().reverse();
            Ok(this.clone())
        }),
        _ => return None,
    };
    Some(Value::native(native))
}

fn method<F>(name: &'static str, arity: usize, body: F) -> NativeFunction
where
    F: Fn(&Shared<Vec<Value>>, &[Value]) -> Result<Value, EvalError> + 'static,
{
    NativeFunction::new(name, arity, move |this, args| {
        let items = this_array(this)?;
        body(&items, args)
    })
}

fn this_array(this: &Value) -> Result<Shared<Vec<Value>>, EvalError> {
    match this {
        Value::Array(items) => Ok(items.clone()),
        other => Err(errors::type_error(format!(
            "Array method called on incompatible receiver {other}"
        ))),
    }
}

/// Resolve `(start, end)` arguments the way `slice` does: negative
/// offsets count from the end, everything is clamped to `0..=len`.
pub(super) fn relative_range(len: usize, args: &[Value]) -> (usize, usize) {
    let resolve = |arg: Option<&Value>, default: usize| -> usize {
        match arg {
            None | Some(Value::Undefined) => default,
            Some(value) => {
                let n = value.to_number();
                let n = if n.is_nan() { 0.0 } else { n.trunc() };
                if n < 0.0 {
                    (len as f64 + n).max(0.0) as usize
                } else {
                    n.min(len as f64) as usize
                }
            }
        }
    };
    let start = resolve(args.first(), 0);
    let end = resolve(args.get(1), len);
    (start, end.max(start))
}
