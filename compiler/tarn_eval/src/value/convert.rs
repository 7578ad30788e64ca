//! Abstract conversions: `ToBoolean`, `ToNumber`, `ToString`, `ToInt32`.

use tarn_ir::Name;

use super::{number_to_string, ObjectBrand, Value};

impl Value {
    /// `ToBoolean`.
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Native(_) => true,
        }
    }

    /// `ToNumber`. Reference values go through their string form.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Str(s) => string_to_number(s),
            Value::Array(_) => string_to_number(&self.to_js_string()),
            Value::Object(_) | Value::Function(_) | Value::Native(_) => f64::NAN,
        }
    }

    /// `ToString`.
    pub fn to_js_string(&self) -> String {
        let mut seen = Vec::new();
        self.render(&mut seen)
    }

    /// `ToPropertyKey`: strings stay as they are, everything else is
    /// stringified.
    pub fn to_property_key(&self) -> Name {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_js_string().into(),
        }
    }

    /// `ToString` with a guard against arrays that contain themselves.
    fn render(&self, seen: &mut Vec<usize>) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => {
                let addr = items.addr();
                if seen.contains(&addr) {
                    return String::new();
                }
                seen.push(addr);
                let parts: Vec<String> = items
                    .borrow()
                    .iter()
                    .map(|item| match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.render(seen),
                    })
                    .collect();
                seen.pop();
                parts.join(",")
            }
            Value::Object(obj) => {
                let obj = obj.borrow();
                match &obj.brand {
                    ObjectBrand::Error(ctor) => {
                        let name = obj
                            .get("name")
                            .map_or_else(|| ctor.to_string(), Value::to_js_string);
                        let message = obj
                            .get("message")
                            .map(Value::to_js_string)
                            .unwrap_or_default();
                        match (name.is_empty(), message.is_empty()) {
                            (_, true) => name,
                            (true, false) => message,
                            (false, false) => format!("{name}: {message}"),
                        }
                    }
                    ObjectBrand::Plain | ObjectBrand::Instance(_) => "[object Object]".to_string(),
                }
            }
            Value::Function(closure) => {
                format!("function {}() {{ [code] }}", closure.display_name())
            }
            Value::Native(native) => format!("function {}() {{ [native code] }}", native.name),
        }
    }
}

/// `StringToNumber`: whitespace-trimmed decimal, hex/octal/binary
/// prefixed integers, `Infinity`; anything else is `NaN`.
pub(crate) fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix_prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in radix_prefixed {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `ToInt32`.
pub fn to_int32(value: &Value) -> i32 {
    to_uint32(value) as i32
}

/// `ToUint32`.
pub fn to_uint32(value: &Value) -> u32 {
    let n = value.to_number();
    if !n.is_finite() {
        return 0;
    }
    let truncated = n.trunc();
    let modulo = truncated.rem_euclid(4_294_967_296.0);
    modulo as u32
}
