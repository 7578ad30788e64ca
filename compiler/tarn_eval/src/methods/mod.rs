//! Property access on values.
//!
//! Objects and function property bags hold their own properties. Arrays,
//! strings and numbers expose a fixed set of built-in members, produced on
//! access as host functions that act on `this`.

mod array;
mod string;

use tarn_ir::Name;

use crate::errors::{self, EvalError, EvalResult};
use crate::value::{number_to_string, NativeFunction, Value};

/// `base[key]`.
pub fn get_property(base: &Value, key: &Name) -> EvalResult {
    match base {
        Value::Undefined | Value::Null => Err(errors::cannot_read_property(base, key.clone())),
        Value::Object(obj) => {
            if let Some(value) = obj.borrow().get(key) {
                return Ok(value.clone());
            }
            Ok(object_member(key).unwrap_or_default())
        }
        Value::Array(items) => {
            if let Some(index) = array_index(key) {
                return Ok(items.borrow().get(index).cloned().unwrap_or_default());
            }
            if &**key == "length" {
                return Ok(Value::Number(items.borrow().len() as f64));
            }
            Ok(array::member(key).unwrap_or_default())
        }
        Value::Str(text) => {
            if let Some(index) = array_index(key) {
                return Ok(text
                    .encode_utf16()
                    .nth(index)
                    .map(|unit| Value::string(&String::from_utf16_lossy(&[unit])))
                    .unwrap_or_default());
            }
            if &**key == "length" {
                return Ok(Value::Number(text.encode_utf16().count() as f64));
            }
            Ok(string::member(key).unwrap_or_default())
        }
        Value::Number(_) => Ok(number_member(key).unwrap_or_default()),
        Value::Bool(_) => Ok(Value::Undefined),
        Value::Function(closure) => {
            if let Some(value) = closure.props.borrow().get(key) {
                return Ok(value.clone());
            }
            Ok(match &**key {
                "name" => Value::string(closure.display_name()),
                "length" => Value::Number(closure.arity() as f64),
                _ => Value::Undefined,
            })
        }
        Value::Native(native) => {
            if let Some(value) = native.props.borrow().get(key) {
                return Ok(value.clone());
            }
            Ok(match &**key {
                "name" => Value::Str(native.name.clone()),
                "length" => Value::Number(native.arity as f64),
                _ => Value::Undefined,
            })
        }
    }
}

/// `base[key] = value`.
pub fn set_property(base: &Value, key: Name, value: Value) -> Result<(), EvalError> {
    match base {
        Value::Undefined | Value::Null => Err(errors::cannot_set_property(base, key)),
        Value::Object(obj) => {
            obj.borrow_mut().set(key, value);
            Ok(())
        }
        Value::Array(items) => {
            if let Some(index) = array_index(&key) {
                let mut items = items.borrow_mut();
                if index >= items.len() {
                    if index >= MAX_DENSE_LENGTH {
                        return Err(errors::range_error("Invalid array length"));
                    }
                    items.resize(index + 1, Value::Undefined);
                }
                items[index] = value;
                return Ok(());
            }
            if &*key == "length" {
                let len = dense_length(value.to_number())?;
                items.borrow_mut().resize(len, Value::Undefined);
                return Ok(());
            }
            Err(errors::type_error(format!(
                "Cannot add property '{key}' to an array"
            )))
        }
        Value::Function(closure) => {
            closure.props.borrow_mut().set(key, value);
            Ok(())
        }
        Value::Native(native) => {
            native.props.borrow_mut().set(key, value);
            Ok(())
        }
        // Writes to primitives are silently dropped.
        Value::Bool(_) | Value::Number(_) | Value::Str(_) => Ok(()),
    }
}

/// `delete base[key]`.
pub fn delete_property(base: &Value, key: &str) -> Result<bool, EvalError> {
    match base {
        Value::Undefined | Value::Null => Err(errors::type_error(format!(
            "Cannot convert undefined or null to object (deleting '{key}')"
        ))),
        Value::Object(obj) => {
            obj.borrow_mut().properties.shift_remove(key);
            Ok(true)
        }
        Value::Array(items) => {
            if let Some(index) = array_index(key) {
                if let Some(slot) = items.borrow_mut().get_mut(index) {
                    *slot = Value::Undefined;
                }
                return Ok(true);
            }
            Ok(key != "length")
        }
        Value::Function(closure) => {
            closure.props.borrow_mut().properties.shift_remove(key);
            Ok(true)
        }
        Value::Native(native) => {
            native.props.borrow_mut().properties.shift_remove(key);
            Ok(true)
        }
        Value::Bool(_) | Value::Number(_) | Value::Str(_) => Ok(true),
    }
}

/// `key in base` for reference values.
pub fn has_property(base: &Value, key: &str) -> bool {
    match base {
        Value::Object(obj) => obj.borrow().properties.contains_key(key),
        Value::Array(items) => {
            key == "length" || array_index(key).is_some_and(|index| index < items.borrow().len())
        }
        Value::Function(closure) => {
            matches!(key, "name" | "length") || closure.props.borrow().properties.contains_key(key)
        }
        Value::Native(native) => {
            matches!(key, "name" | "length") || native.props.borrow().properties.contains_key(key)
        }
        _ => false,
    }
}

/// Enumerable own keys, in `for...in` order.
pub fn enumerable_keys(base: &Value) -> Vec<Name> {
    match base {
        Value::Object(obj) => obj.borrow().properties.keys().cloned().collect(),
        Value::Array(items) => index_keys(items.borrow().len()),
        Value::Str(text) => index_keys(text.encode_utf16().count()),
        Value::Function(closure) => closure.props.borrow().properties.keys().cloned().collect(),
        Value::Native(native) => native.props.borrow().properties.keys().cloned().collect(),
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) => Vec::new(),
    }
}

fn index_keys(len: usize) -> Vec<Name> {
    (0..len).map(|i| Name::from(i.to_string())).collect()
}

/// Largest length an array may grow to. Arrays are stored densely.
const MAX_DENSE_LENGTH: usize = 1 << 24;

/// Canonical array index (`"0"`, `"12"`; not `"01"` or `"1.0"`).
///
/// Indices stop below 2^32 - 1; larger numerals are plain property keys.
pub(crate) fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>()
        .ok()
        .filter(|&index| index < u32::MAX)
        .map(|index| index as usize)
}

/// Validate a requested array length.
pub(crate) fn dense_length(len: f64) -> Result<usize, EvalError> {
    if len < 0.0 || len.fract() != 0.0 || len > f64::from(u32::MAX) {
        return Err(errors::range_error("Invalid array length"));
    }
    let len = len as usize;
    if len > MAX_DENSE_LENGTH {
        return Err(errors::range_error("Invalid array length"));
    }
    Ok(len)
}

/// Members every plain object answers to.
fn object_member(key: &str) -> Option<Value> {
    let native = match key {
        "hasOwnProperty" => NativeFunction::new("hasOwnProperty", 1, |this, args| {
            let key = args.first().cloned().unwrap_or_default().to_property_key();
            Ok(Value::Bool(has_property(this, &key)))
        }),
        "toString" => NativeFunction::new("toString", 0, |this, _| {
            Ok(Value::string(&this.to_js_string()))
        }),
        _ => return None,
    };
    Some(Value::native(native))
}

fn number_member(key: &str) -> Option<Value> {
    let native = match key {
        "toString" => NativeFunction::new("toString", 1, |this, args| {
            let n = this.to_number();
            match args.first().map(Value::to_number) {
                None => Ok(Value::string(&number_to_string(n))),
                Some(radix) if radix == 10.0 => Ok(Value::string(&number_to_string(n))),
                Some(radix) => integer_to_radix(n, radix).map(|s| Value::string(&s)),
            }
        }),
        "toFixed" => NativeFunction::new("toFixed", 1, |this, args| {
            let digits = args.first().map_or(0.0, Value::to_number);
            if !(0.0..=100.0).contains(&digits) {
                return Err(errors::range_error(
                    "toFixed() digits argument must be between 0 and 100",
                ));
            }
            let n = this.to_number();
            if !n.is_finite() {
                return Ok(Value::string(&number_to_string(n)));
            }
            Ok(Value::string(&format!("{n:.*}", digits as usize)))
        }),
        _ => return None,
    };
    Some(Value::native(native))
}

fn integer_to_radix(n: f64, radix: f64) -> Result<String, EvalError> {
    if !(2.0..=36.0).contains(&radix) || radix.fract() != 0.0 {
        return Err(errors::range_error(
            "toString() radix must be between 2 and 36",
        ));
    }
    if !n.is_finite() {
        return Ok(number_to_string(n));
    }
    let radix = radix as u32;
    let negative = n < 0.0;
    let mut value = n.abs().trunc() as u64;
    let mut digits = Vec::new();
    loop {
        let digit = (value % u64::from(radix)) as u32;
        digits.push(char::from_digit(digit, radix).unwrap_or('?'));
        value /= u64::from(radix);
        if value == 0 {
            break;
        }
    }
    if negative {
        digits.push('-');
    }
    Ok(digits.into_iter().rev().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
