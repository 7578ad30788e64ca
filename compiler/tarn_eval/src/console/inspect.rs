//! Human-readable rendering of values for console output.

use crate::value::{number_to_string, ObjectBrand, Value};

/// Nesting depth below which objects print as `[Object]`.
const MAX_DEPTH: usize = 3;

/// Join `console.log` arguments: strings print raw, everything else is
/// inspected.
pub fn format_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::Str(s) => s.to_string(),
            other => inspect(other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a value the way an interactive console shows it.
///
/// Strings nested inside containers are quoted; cycles print as
/// `[Circular]`.
pub fn inspect(value: &Value) -> String {
    let mut seen = Vec::new();
    render(value, 0, &mut seen)
}

fn render(value: &Value, depth: usize, seen: &mut Vec<usize>) -> String {
    match value {
        Value::Str(s) if depth > 0 => format!("'{s}'"),
        Value::Number(n) => number_to_string(*n),
        Value::Array(items) => {
            if seen.contains(&items.addr()) {
                return "[Circular]".to_string();
            }
            if depth >= MAX_DEPTH {
                return "[Array]".to_string();
            }
            seen.push(items.addr());
            let parts: Vec<String> = items
                .borrow()
                .iter()
                .map(|item| render(item, depth + 1, seen))
                .collect();
            seen.pop();
            if parts.is_empty() {
                "[]".to_string()
            } else {
                format!("[ {} ]", parts.join(", "))
            }
        }
        Value::Object(obj) => {
            if seen.contains(&obj.addr()) {
                return "[Circular]".to_string();
            }
            if let ObjectBrand::Error(_) = obj.borrow().brand {
                return value.to_js_string();
            }
            if depth >= MAX_DEPTH {
                return "[Object]".to_string();
            }
            seen.push(obj.addr());
            let parts: Vec<String> = obj
                .borrow()
                .properties
                .iter()
                .map(|(key, item)| {
                    format!("{}: {}", render_key(key), render(item, depth + 1, seen))
                })
                .collect();
            seen.pop();
            if parts.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", parts.join(", "))
            }
        }
        Value::Function(closure) => format!("[Function: {}]", closure.display_name()),
        Value::Native(native) => format!("[Function: {}]", native.name),
        other => other.to_js_string(),
    }
}

fn render_key(key: &str) -> String {
    let is_identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        key.to_string()
    } else {
        format!("'{key}'")
    }
}
