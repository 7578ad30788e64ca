//! The conventional global catalog.

use crate::console::{format_args, ConsoleLevel, SharedConsole};
use crate::errors::{self, error_object};
use crate::methods;
use crate::value::{NativeFunction, ObjectBrand, PropertyMap, Value};

use super::{json_parse, json_stringify, HostBindings};

const ERROR_CONSTRUCTORS: [&str; 5] = [
    "Error",
    "TypeError",
    "ReferenceError",
    "RangeError",
    "SyntaxError",
];

pub(super) fn install(bindings: &mut HostBindings, console: SharedConsole) {
    bindings
        .insert("undefined", Value::Undefined)
        .insert("NaN", Value::Number(f64::NAN))
        .insert("Infinity", Value::Number(f64::INFINITY))
        .insert("console", console_object(&console))
        .insert("JSON", json_object())
        .insert("Math", math_object())
        .insert("Object", object_constructor())
        .insert("Array", array_constructor());

    bindings
        .native("isNaN", 1, |_, args| Ok(Value::Bool(arg(args, 0).to_number().is_nan())))
        .native("isFinite", 1, |_, args| {
            Ok(Value::Bool(arg(args, 0).to_number().is_finite()))
        })
        .native("parseInt", 2, |_, args| {
            let radix = match arg(args, 1) {
                Value::Undefined => 0,
                other => other.to_number() as u32,
            };
            Ok(Value::Number(parse_int(&arg(args, 0).to_js_string(), radix)))
        })
        .native("parseFloat", 1, |_, args| {
            Ok(Value::Number(parse_float(&arg(args, 0).to_js_string())))
        })
        .native("String", 1, |_, args| {
            Ok(match args.first() {
                None => Value::string(""),
                Some(value) => Value::string(&value.to_js_string()),
            })
        })
        .native("Number", 1, |_, args| {
            Ok(Value::Number(args.first().map_or(0.0, Value::to_number)))
        })
        .native("Boolean", 1, |_, args| Ok(Value::Bool(arg(args, 0).to_boolean())));

    for name in ERROR_CONSTRUCTORS {
        bindings.insert(name, error_constructor(name));
    }
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

fn console_object(console: &SharedConsole) -> Value {
    let mut properties = PropertyMap::default();
    for level in [
        ConsoleLevel::Log,
        ConsoleLevel::Info,
        ConsoleLevel::Warn,
        ConsoleLevel::Error,
    ] {
        let sink = console.clone();
        let method = NativeFunction::new(level.method_name(), 0, move |_, args| {
            sink.write(level, &format_args(args));
            Ok(Value::Undefined)
        });
        properties.insert(level.method_name().into(), Value::native(method));
    }
    Value::object(properties)
}

fn json_object() -> Value {
    Value::object_from([
        (
            "stringify",
            Value::native(NativeFunction::new("stringify", 3, |_, args| {
                json_stringify(&arg(args, 0), args.get(2))
            })),
        ),
        (
            "parse",
            Value::native(NativeFunction::new("parse", 2, |_, args| {
                json_parse(&arg(args, 0).to_js_string())
            })),
        ),
    ])
}

fn math_object() -> Value {
    fn unary(name: &'static str, op: fn(f64) -> f64) -> (&'static str, Value) {
        (
            name,
            Value::native(NativeFunction::new(name, 1, move |_, args| {
                Ok(Value::Number(op(arg(args, 0).to_number())))
            })),
        )
    }

    Value::object_from([
        ("PI", Value::Number(std::f64::consts::PI)),
        ("E", Value::Number(std::f64::consts::E)),
        unary("abs", f64::abs),
        unary("floor", f64::floor),
        unary("ceil", f64::ceil),
        unary("sqrt", f64::sqrt),
        unary("trunc", f64::trunc),
        unary("sign", |n| if n == 0.0 || n.is_nan() { n } else { n.signum() }),
        // Halves round towards +Infinity.
        unary("round", |n| (n + 0.5).floor()),
        (
            "pow",
            Value::native(NativeFunction::new("pow", 2, |_, args| {
                Ok(Value::Number(
                    arg(args, 0).to_number().powf(arg(args, 1).to_number()),
                ))
            })),
        ),
        (
            "max",
            Value::native(NativeFunction::new("max", 2, |_, args| {
                Ok(Value::Number(fold_numbers(args, f64::NEG_INFINITY, f64::max)))
            })),
        ),
        (
            "min",
            Value::native(NativeFunction::new("min", 2, |_, args| {
                Ok(Value::Number(fold_numbers(args, f64::INFINITY, f64::min)))
            })),
        ),
    ])
}

/// `Math.max`/`Math.min`: any `NaN` argument wins.
fn fold_numbers(args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> f64 {
    args.iter().map(Value::to_number).fold(init, |acc, n| {
        if acc.is_nan() || n.is_nan() {
            f64::NAN
        } else {
            pick(acc, n)
        }
    })
}

fn object_constructor() -> Value {
    let ctor = NativeFunction::new("Object", 1, |_, args| {
        Ok(match args.first() {
            Some(value) if value.is_reference() => value.clone(),
            _ => Value::empty_object(),
        })
    })
    .constructor(Value::is_reference)
    .with_prop(
        "assign",
        Value::native(NativeFunction::new("assign", 2, |_, args| {
            let target = arg(args, 0);
            if target.is_nullish() {
                return Err(errors::type_error(
                    "Cannot convert undefined or null to object",
                ));
            }
            for source in args.iter().skip(1) {
                for key in methods::enumerable_keys(source) {
                    let value = methods::get_property(source, &key)?;
                    methods::set_property(&target, key, value)?;
                }
            }
            Ok(target)
        })),
    )
    .with_prop(
        "keys",
        Value::native(NativeFunction::new("keys", 1, |_, args| {
            let keys = methods::enumerable_keys(&arg(args, 0));
            Ok(Value::array(keys.into_iter().map(Value::Str).collect()))
        })),
    )
    .with_prop(
        "values",
        Value::native(NativeFunction::new("values", 1, |_, args| {
            let source = arg(args, 0);
            let values = methods::enumerable_keys(&source)
                .iter()
                .map(|key| methods::get_property(&source, key))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::array(values))
        })),
    );
    Value::native(ctor)
}

fn array_constructor() -> Value {
    let ctor = NativeFunction::new("Array", 1, |_, args| match args {
        [Value::Number(len)] => {
            let len = methods::dense_length(*len)?;
            Ok(Value::array(vec![Value::Undefined; len]))
        }
        items => Ok(Value::array(items.to_vec())),
    })
    .constructor(|value| matches!(value, Value::Array(_)))
    .with_prop(
        "isArray",
        Value::native(NativeFunction::new("isArray", 1, |_, args| {
            Ok(Value::Bool(matches!(args.first(), Some(Value::Array(_)))))
        })),
    );
    Value::native(ctor)
}

fn error_constructor(name: &'static str) -> Value {
    let check: fn(&Value) -> bool = match name {
        "Error" => |value| has_error_brand(value, None),
        "TypeError" => |value| has_error_brand(value, Some("TypeError")),
        "ReferenceError" => |value| has_error_brand(value, Some("ReferenceError")),
        "RangeError" => |value| has_error_brand(value, Some("RangeError")),
        _ => |value| has_error_brand(value, Some("SyntaxError")),
    };
    let ctor = NativeFunction::new(name, 1, move |_, args| {
        let message = match args.first() {
            None | Some(Value::Undefined) => String::new(),
            Some(message) => message.to_js_string(),
        };
        Ok(error_object(name, &message))
    })
    .constructor(check);
    Value::native(ctor)
}

fn has_error_brand(value: &Value, expected: Option<&str>) -> bool {
    let Value::Object(obj) = value else {
        return false;
    };
    match &obj.borrow().brand {
        ObjectBrand::Error(name) => expected.map_or(true, |expected| &**name == expected),
        ObjectBrand::Plain | ObjectBrand::Instance(_) => false,
    }
}

/// `parseInt`: optional sign, optional `0x` prefix, then the longest run
/// of digits valid in `radix`.
fn parse_int(text: &str, radix: u32) -> f64 {
    let text = text.trim_start();
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    let hex_prefixed = rest.starts_with("0x") || rest.starts_with("0X");
    let (radix, digits) = match radix {
        0 if hex_prefixed => (16, &rest[2..]),
        0 => (10, rest),
        16 if hex_prefixed => (16, &rest[2..]),
        2..=36 => (radix, rest),
        _ => return f64::NAN,
    };

    let mut value = 0.0;
    let mut any = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = value * f64::from(radix) + f64::from(digit);
        any = true;
    }
    if any {
        sign * value
    } else {
        f64::NAN
    }
}

/// `parseFloat`: the longest prefix that reads as a decimal literal.
fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    for infinity in ["Infinity", "+Infinity"] {
        if text.starts_with(infinity) {
            return f64::INFINITY;
        }
    }
    if text.starts_with("-Infinity") {
        return f64::NEG_INFINITY;
    }

    let bytes = text.as_bytes();
    let mut end = 0;
    let mut best = None;
    let mut seen_dot = false;
    let mut seen_exp = false;
    while end < bytes.len() {
        let b = bytes[end];
        let accepted = match b {
            b'0'..=b'9' => true,
            b'+' | b'-' => end == 0 || matches!(bytes[end - 1], b'e' | b'E'),
            b'.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                true
            }
            b'e' | b'E' if !seen_exp && end > 0 => {
                seen_exp = true;
                true
            }
            _ => false,
        };
        if !accepted {
            break;
        }
        end += 1;
        if let Ok(n) = text[..end].parse::<f64>() {
            best = Some(n);
        }
    }
    best.unwrap_or(f64::NAN)
}
